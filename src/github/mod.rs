//! GitHub GraphQL access for comment moderation.
//!
//! This module wraps Octocrab to page through a repository's discussions,
//! issues, and pull requests together with their comments, and to minimize
//! comments as spam. Errors are mapped into [`ModerationError`] so callers can
//! decide per container kind whether to continue.

pub mod error;
pub mod gateway;
pub mod graphql;
pub mod locator;
pub mod models;
pub mod pagination;

pub use error::ModerationError;
pub use gateway::{CommentGateway, OctocrabCommentGateway};
pub use locator::{
    DEFAULT_API_BASE, PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner,
};
pub use models::{
    Comment, CommentId, CommentPage, CommentPageRequest, Container, ContainerKind, ContainerPage,
    ContainerPageRequest, Decoded,
};
pub use pagination::{CursorToken, PageInfo};

#[cfg(test)]
pub use gateway::MockCommentGateway;

#[cfg(test)]
mod tests;
