//! Error types exposed by the moderation crawler.

use thiserror::Error;

/// Errors surfaced while configuring the crawler or talking to remote services.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModerationError {
    /// No repository identifier was configured.
    #[error("repository is required (use --repository or GITHUB_REPOSITORY)")]
    MissingRepository,

    /// The repository identifier is not in `owner/repo` form.
    #[error("repository must be in 'owner/repo' form, got '{identifier}'")]
    InvalidRepository {
        /// The identifier exactly as supplied.
        identifier: String,
    },

    /// A URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned an API error, including GraphQL `errors` payloads.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response detail describing the failure.
        message: String,
    },

    /// Networking failed while calling a remote service.
    #[error("network error: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A response was missing fields required to continue.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Which part of the response was missing or mistyped.
        message: String,
    },

    /// The spam classifier failed to produce a verdict.
    #[error("spam classifier failed: {message}")]
    Classifier {
        /// Error detail from the classifier endpoint.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}
