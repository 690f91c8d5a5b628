//! Cursor-based pagination state for GitHub GraphQL connections.
//!
//! GraphQL connections expose a `pageInfo { hasNextPage endCursor }` pair.
//! `PageInfo` captures that pair, and `CursorToken` wraps the opaque cursor
//! string so it cannot be confused with other identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque pagination token returned by a GraphQL connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CursorToken(String);

impl CursorToken {
    /// Wraps a raw cursor string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the cursor value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CursorToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Position of a fetched page within its connection.
///
/// # Example
///
/// ```
/// use spam_sweeper::github::pagination::{CursorToken, PageInfo};
///
/// let info = PageInfo::new(true, Some(CursorToken::new("Y3Vyc29yOjEw")));
/// assert!(info.has_next_page());
/// assert_eq!(info.end_cursor().map(CursorToken::as_str), Some("Y3Vyc29yOjEw"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<CursorToken>,
}

impl PageInfo {
    /// Creates page info from the raw connection fields.
    #[must_use]
    pub const fn new(has_next_page: bool, end_cursor: Option<CursorToken>) -> Self {
        Self {
            has_next_page,
            end_cursor,
        }
    }

    /// Page info for the final page of a connection.
    #[must_use]
    pub const fn last(end_cursor: Option<CursorToken>) -> Self {
        Self::new(false, end_cursor)
    }

    /// Returns true if more items exist after this page.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Cursor of the last item on this page, absent for empty pages.
    #[must_use]
    pub const fn end_cursor(&self) -> Option<&CursorToken> {
        self.end_cursor.as_ref()
    }
}
