//! Test helpers for constructing comment and container fixtures.
//!
//! # Examples
//!
//! ```
//! use spam_sweeper::github::models::test_support::{comment, container};
//!
//! let thread = container("D_1", vec![comment("C_1", "hello")]);
//! assert_eq!(thread.comments.comments.len(), 1);
//! ```

use super::{Comment, CommentId, CommentPage, Container, ContainerKind, ContainerPage, Decoded};
use crate::github::pagination::{CursorToken, PageInfo};

/// Builds an unminimized comment.
#[must_use]
pub fn comment(id: &str, body: &str) -> Comment {
    Comment {
        id: CommentId::new(id),
        body: body.to_owned(),
        is_minimized: false,
    }
}

/// Builds a comment that is already hidden.
#[must_use]
pub fn minimized_comment(id: &str, body: &str) -> Comment {
    Comment {
        is_minimized: true,
        ..comment(id, body)
    }
}

/// Builds a container whose comments fit on a single page.
#[must_use]
pub fn container(id: &str, comments: Vec<Comment>) -> Container {
    Container {
        id: id.to_owned(),
        title: format!("Container {id}"),
        comments: CommentPage {
            comments: comments.into_iter().map(Decoded::Valid).collect(),
            page_info: PageInfo::last(None),
        },
    }
}

/// Builds a container page from decoded entries.
#[must_use]
pub fn container_page(
    kind: ContainerKind,
    containers: Vec<Decoded<Container>>,
    has_next_page: bool,
    end_cursor: Option<&str>,
) -> ContainerPage {
    ContainerPage {
        kind,
        containers,
        page_info: PageInfo::new(has_next_page, end_cursor.map(CursorToken::new)),
    }
}
