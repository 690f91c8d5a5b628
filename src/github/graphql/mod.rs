//! GraphQL documents and response decoding for comment moderation.
//!
//! Responses are decoded in two passes. The envelope (`data`, `errors`, the
//! connection and its `pageInfo`) must be well formed or the whole page is
//! rejected, because pagination cannot continue without it. Individual edges
//! are decoded one by one so a malformed container or comment only skips
//! itself.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ModerationError;
use super::models::{
    Comment, CommentId, CommentPage, Container, ContainerKind, ContainerPage, Decoded,
};
use super::pagination::{CursorToken, PageInfo};

const COMMENT_CONNECTION_FIELDS: &str = "edges { node { id body isMinimized } cursor } \
     pageInfo { endCursor hasNextPage }";

/// Builds the query listing one page of containers with their first comments.
#[must_use]
pub fn container_page_query(kind: ContainerKind) -> String {
    format!(
        "query($owner: String!, $repo: String!, $first: Int!, $after: String) {{ \
           repository(owner: $owner, name: $repo) {{ \
             {connection}(first: $first, after: $after) {{ \
               edges {{ node {{ id title comments(first: $first) {{ {COMMENT_CONNECTION_FIELDS} }} }} }} \
               pageInfo {{ hasNextPage endCursor }} \
             }} \
           }} \
         }}",
        connection = kind.connection_field(),
    )
}

/// Builds the query for a follow-up page of one container's comments.
#[must_use]
pub fn comment_page_query(kind: ContainerKind) -> String {
    format!(
        "query($id: ID!, $first: Int!, $after: String) {{ \
           node(id: $id) {{ \
             ... on {type_name} {{ comments(first: $first, after: $after) {{ {COMMENT_CONNECTION_FIELDS} }} }} \
           }} \
         }}",
        type_name = kind.graphql_type(),
    )
}

/// Mutation hiding a comment with the `SPAM` classifier.
pub const MINIMIZE_COMMENT_MUTATION: &str = "mutation($commentId: ID!) { \
       minimizeComment(input: {subjectId: $commentId, classifier: SPAM}) { \
         minimizedComment { isMinimized minimizedReason } \
       } \
     }";

/// Request body sent to the GraphQL endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlPayload<V: Serialize> {
    /// GraphQL document.
    pub query: String,
    /// Variables referenced by the document.
    pub variables: V,
}

/// Top-level GraphQL response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlResponse {
    /// Response data, absent when the request failed entirely.
    #[serde(default)]
    pub data: Option<Value>,
    /// Errors reported alongside (or instead of) the data.
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// A single GraphQL error.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    /// Error message.
    pub message: String,
}

impl GraphQlResponse {
    /// Returns the `data` object, failing when GitHub returned only errors.
    ///
    /// Partial responses (data plus errors) are accepted; the errors are
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::Api` when `data` is absent or null.
    pub fn into_data(self, operation: &str) -> Result<Value, ModerationError> {
        let messages = self
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|error| error.message)
            .collect::<Vec<_>>()
            .join("; ");

        match self.data {
            Some(data) if !data.is_null() => {
                if !messages.is_empty() {
                    tracing::warn!("{operation} returned partial data: {messages}");
                }
                Ok(data)
            }
            _ if messages.is_empty() => Err(ModerationError::Api {
                message: format!("{operation} returned no data"),
            }),
            _ => Err(ModerationError::Api {
                message: format!("{operation} failed: {messages}"),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPageInfo {
    has_next_page: bool,
    #[serde(default)]
    end_cursor: Option<String>,
}

impl From<ApiPageInfo> for PageInfo {
    fn from(api: ApiPageInfo) -> Self {
        Self::new(api.has_next_page, api.end_cursor.map(CursorToken::new))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiConnection {
    edges: Vec<Value>,
    page_info: ApiPageInfo,
}

#[derive(Debug, Deserialize)]
struct ApiContainerEdge {
    node: ApiContainerNode,
}

#[derive(Debug, Deserialize)]
struct ApiContainerNode {
    id: String,
    #[serde(default)]
    title: Option<String>,
    comments: ApiConnection,
}

#[derive(Debug, Deserialize)]
struct ApiCommentEdge {
    node: ApiCommentNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCommentNode {
    id: String,
    body: String,
    is_minimized: bool,
}

fn field<'value>(
    value: &'value Value,
    name: &str,
    context: &str,
) -> Result<&'value Value, ModerationError> {
    value
        .get(name)
        .filter(|inner| !inner.is_null())
        .ok_or_else(|| ModerationError::MalformedResponse {
            message: format!("{context}: missing field `{name}`"),
        })
}

fn decode_connection(value: &Value, context: &str) -> Result<ApiConnection, ModerationError> {
    ApiConnection::deserialize(value).map_err(|error| ModerationError::MalformedResponse {
        message: format!("{context}: {error}"),
    })
}

fn decode_comment(edge: Value) -> Decoded<Comment> {
    match serde_json::from_value::<ApiCommentEdge>(edge) {
        Ok(ApiCommentEdge { node }) => Decoded::Valid(Comment {
            id: CommentId::new(node.id),
            body: node.body,
            is_minimized: node.is_minimized,
        }),
        Err(error) => Decoded::malformed(format!("comment edge: {error}")),
    }
}

fn decode_comment_connection(connection: ApiConnection) -> CommentPage {
    CommentPage {
        comments: connection.edges.into_iter().map(decode_comment).collect(),
        page_info: connection.page_info.into(),
    }
}

fn decode_container(edge: Value) -> Decoded<Container> {
    match serde_json::from_value::<ApiContainerEdge>(edge) {
        Ok(ApiContainerEdge { node }) => Decoded::Valid(Container {
            id: node.id,
            title: node.title.unwrap_or_default(),
            comments: decode_comment_connection(node.comments),
        }),
        Err(error) => Decoded::malformed(format!("container edge: {error}")),
    }
}

/// Decodes the `data` object of a container page query.
///
/// # Errors
///
/// Returns `ModerationError::MalformedResponse` when the repository, the
/// connection, or its `pageInfo` is missing. Malformed edges are returned as
/// [`Decoded::Malformed`] entries instead.
pub fn decode_container_page(
    kind: ContainerKind,
    data: &Value,
) -> Result<ContainerPage, ModerationError> {
    let repository = field(data, "repository", "container page")?;
    let connection_value = field(repository, kind.connection_field(), "repository")?;
    let connection = decode_connection(connection_value, kind.connection_field())?;

    Ok(ContainerPage {
        kind,
        containers: connection.edges.into_iter().map(decode_container).collect(),
        page_info: connection.page_info.into(),
    })
}

/// Decodes the `data` object of a follow-up comment page query.
///
/// # Errors
///
/// Returns `ModerationError::MalformedResponse` when the node or its comment
/// connection is missing.
pub fn decode_comment_page(data: &Value) -> Result<CommentPage, ModerationError> {
    let node = field(data, "node", "comment page")?;
    let connection_value = field(node, "comments", "node")?;
    decode_connection(connection_value, "comments").map(decode_comment_connection)
}

/// Extracts `minimizedComment.isMinimized` from a minimize mutation result.
///
/// # Errors
///
/// Returns `ModerationError::MalformedResponse` when the flag is missing.
pub fn decode_minimize_result(data: &Value) -> Result<bool, ModerationError> {
    let payload = field(data, "minimizeComment", "minimize result")?;
    let minimized = field(payload, "minimizedComment", "minimizeComment")?;
    field(minimized, "isMinimized", "minimizedComment")?
        .as_bool()
        .ok_or_else(|| ModerationError::MalformedResponse {
            message: "minimizedComment: `isMinimized` is not a boolean".to_owned(),
        })
}
