//! Domain models for comment containers and their comments.
//!
//! Containers (discussions, issues, pull requests) own a paginated list of
//! comments. Entries decoded from a GraphQL page are wrapped in [`Decoded`] so
//! a single malformed entity can be skipped without discarding its siblings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ModerationError;
use super::pagination::{CursorToken, PageInfo};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Kind of comment container crawled in a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// GitHub Discussions thread.
    Discussion,
    /// Issue.
    Issue,
    /// Pull request conversation.
    PullRequest,
}

impl ContainerKind {
    /// Every kind, in crawl order.
    pub const ALL: [Self; 3] = [Self::Discussion, Self::Issue, Self::PullRequest];

    /// Stable snake-case name used for cursor keys and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discussion => "discussion",
            Self::Issue => "issue",
            Self::PullRequest => "pull_request",
        }
    }

    /// Name of the repository connection listing containers of this kind.
    #[must_use]
    pub const fn connection_field(self) -> &'static str {
        match self {
            Self::Discussion => "discussions",
            Self::Issue => "issues",
            Self::PullRequest => "pullRequests",
        }
    }

    /// GraphQL object type name, used in inline fragments.
    #[must_use]
    pub const fn graphql_type(self) -> &'static str {
        match self {
            Self::Discussion => "Discussion",
            Self::Issue => "Issue",
            Self::PullRequest => "PullRequest",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ContainerKind {
    type Err = ModerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "discussion" | "discussions" => Ok(Self::Discussion),
            "issue" | "issues" => Ok(Self::Issue),
            "pull_request" | "pull_requests" | "pullrequest" | "pullrequests" | "pr" => {
                Ok(Self::PullRequest)
            }
            other => Err(ModerationError::Configuration {
                message: format!(
                    "unknown container kind '{other}' (expected discussion, issue, or pull_request)"
                ),
            }),
        }
    }
}

/// GraphQL node identifier of a comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Wraps a raw node identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// A single comment as seen by the crawler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Node identifier, used by the minimize mutation.
    pub id: CommentId,
    /// Markdown body.
    pub body: String,
    /// Whether the comment is already hidden.
    pub is_minimized: bool,
}

/// Outcome of decoding one entry of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// The entry carried every required field.
    Valid(T),
    /// The entry was missing or mistyped a required field.
    Malformed {
        /// Human-readable description of what was wrong.
        reason: String,
    },
}

impl<T> Decoded<T> {
    /// Builds a malformed entry.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// A page of comments belonging to one container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPage {
    /// Comments in connection order.
    pub comments: Vec<Decoded<Comment>>,
    /// Pagination state of the comment connection.
    pub page_info: PageInfo,
}

/// A discussion, issue, or pull request with its first page of comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Node identifier.
    pub id: String,
    /// Title, empty when GitHub omitted it.
    pub title: String,
    /// First page of comments.
    pub comments: CommentPage,
}

/// A page of containers of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerPage {
    /// Kind of every container on the page.
    pub kind: ContainerKind,
    /// Containers in connection order.
    pub containers: Vec<Decoded<Container>>,
    /// Pagination state of the container connection.
    pub page_info: PageInfo,
}

/// Request for one page of containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerPageRequest {
    /// Kind of containers to list.
    pub kind: ContainerKind,
    /// Page size for both containers and their nested comments.
    pub first: u8,
    /// Start strictly after this cursor, or at the beginning when absent.
    pub after: Option<CursorToken>,
}

/// Request for a follow-up page of one container's comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPageRequest {
    /// Kind of the owning container.
    pub kind: ContainerKind,
    /// Node identifier of the owning container.
    pub container_id: String,
    /// Page size.
    pub first: u8,
    /// Start strictly after this comment cursor.
    pub after: CursorToken,
}
