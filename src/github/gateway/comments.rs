//! Octocrab-backed gateway issuing the moderation GraphQL documents.

use std::time::Duration;

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Serialize;
use serde_json::{Value, json};

use crate::github::error::ModerationError;
use crate::github::graphql::{
    GraphQlPayload, GraphQlResponse, MINIMIZE_COMMENT_MUTATION, comment_page_query,
    container_page_query, decode_comment_page, decode_container_page, decode_minimize_result,
};
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::models::{
    CommentId, CommentPage, CommentPageRequest, ContainerPage, ContainerPageRequest,
};

use super::CommentGateway;
use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;

/// Octocrab-backed comment gateway.
pub struct OctocrabCommentGateway {
    client: Octocrab,
}

impl OctocrabCommentGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and repository locator.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::InvalidUrl` when the base URI cannot be parsed
    /// or `ModerationError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &RepositoryLocator,
        timeout: Duration,
    ) -> Result<Self, ModerationError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str(), timeout)?;
        Ok(Self::new(octocrab))
    }

    async fn execute<V>(
        &self,
        operation: &str,
        payload: &GraphQlPayload<V>,
    ) -> Result<Value, ModerationError>
    where
        V: Serialize + Sync,
    {
        let raw: Value = self
            .client
            .graphql(payload)
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        let response: GraphQlResponse =
            serde_json::from_value(raw).map_err(|error| ModerationError::MalformedResponse {
                message: format!("{operation} returned an invalid GraphQL envelope: {error}"),
            })?;

        response.into_data(operation)
    }
}

#[async_trait]
impl CommentGateway for OctocrabCommentGateway {
    async fn container_page(
        &self,
        locator: &RepositoryLocator,
        request: &ContainerPageRequest,
    ) -> Result<ContainerPage, ModerationError> {
        let operation = format!("list {}", request.kind.connection_field());
        let payload = GraphQlPayload {
            query: container_page_query(request.kind),
            variables: json!({
                "owner": locator.owner().as_str(),
                "repo": locator.repository().as_str(),
                "first": request.first,
                "after": request.after.as_ref().map(|cursor| cursor.as_str()),
            }),
        };

        let data = self.execute(&operation, &payload).await?;
        decode_container_page(request.kind, &data)
    }

    async fn comment_page(
        &self,
        request: &CommentPageRequest,
    ) -> Result<CommentPage, ModerationError> {
        let payload = GraphQlPayload {
            query: comment_page_query(request.kind),
            variables: json!({
                "id": request.container_id,
                "first": request.first,
                "after": request.after.as_str(),
            }),
        };

        let data = self.execute("list comments", &payload).await?;
        decode_comment_page(&data)
    }

    async fn minimize_comment(&self, comment_id: &CommentId) -> Result<bool, ModerationError> {
        let payload = GraphQlPayload {
            query: MINIMIZE_COMMENT_MUTATION.to_owned(),
            variables: json!({ "commentId": comment_id.as_str() }),
        };

        let data = self.execute("minimize comment", &payload).await?;
        decode_minimize_result(&data)
    }
}
