//! Gateways for crawling and moderating comments through Octocrab.
//!
//! This module provides a trait-based gateway for communicating with the
//! GitHub GraphQL API. The trait-based design enables mocking in tests while
//! the Octocrab implementation handles real HTTP requests.

mod client;
mod comments;
mod error_mapping;

pub use comments::OctocrabCommentGateway;

use async_trait::async_trait;

use crate::github::error::ModerationError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{
    CommentId, CommentPage, CommentPageRequest, ContainerPage, ContainerPageRequest,
};

/// Gateway that can list comment containers and hide comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentGateway: Send + Sync {
    /// Fetch one page of containers, each with its first page of comments.
    async fn container_page(
        &self,
        locator: &RepositoryLocator,
        request: &ContainerPageRequest,
    ) -> Result<ContainerPage, ModerationError>;

    /// Fetch a follow-up page of one container's comments.
    async fn comment_page(
        &self,
        request: &CommentPageRequest,
    ) -> Result<CommentPage, ModerationError>;

    /// Minimize a comment as spam, returning whether GitHub reports it hidden.
    async fn minimize_comment(&self, comment_id: &CommentId) -> Result<bool, ModerationError>;
}
