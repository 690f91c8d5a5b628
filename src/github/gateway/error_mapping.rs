//! Error mapping helpers for the Octocrab gateway implementation.

use http::StatusCode;

use crate::github::error::ModerationError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ModerationError {
    match error {
        octocrab::Error::GitHub { source, .. } if is_auth_failure(source.status_code) => {
            ModerationError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        }
        octocrab::Error::GitHub { source, .. } => ModerationError::Api {
            message: format!(
                "{operation} failed with status {status}: {message}",
                status = source.status_code,
                message = source.message
            ),
        },
        octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => {
            ModerationError::MalformedResponse {
                message: format!("{operation} response could not be decoded: {error}"),
            }
        }
        _ if is_network_error(error) => ModerationError::Network {
            message: format!("{operation} failed: {error}"),
        },
        _ => ModerationError::Api {
            message: format!("{operation} failed: {error}"),
        },
    }
}
