//! Octocrab client construction helpers for gateway implementations.

use std::time::Duration;

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::ModerationError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given token and API base URL.
///
/// Connect and read timeouts are both set to `timeout`; GitHub calls are
/// otherwise unbounded.
///
/// # Errors
///
/// Returns `ModerationError::InvalidUrl` when the base URI cannot be parsed or
/// `ModerationError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
    timeout: Duration,
) -> Result<Octocrab, ModerationError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| ModerationError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .set_connect_timeout(Some(timeout))
        .set_read_timeout(Some(timeout))
        .base_uri(base_uri)
        .map_err(|error| ModerationError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
