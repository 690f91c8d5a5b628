//! Repository identity wrappers and credential handling.

use std::fmt;

use url::Url;

use super::error::ModerationError;

/// Public GitHub API host used when no override is configured.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
///
/// `Debug` output is redacted so tokens never reach log lines.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ModerationError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ModerationError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

/// Target repository together with the API base used to reach it.
///
/// # Example
///
/// ```
/// use spam_sweeper::github::RepositoryLocator;
///
/// let locator = RepositoryLocator::from_identifier("octo/repo")
///     .expect("should parse owner/repo identifier");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "repo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Parses a combined `owner/repo` identifier, as exported by GitHub
    /// Actions in `GITHUB_REPOSITORY`.
    ///
    /// Uses the public GitHub API as the base.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::InvalidRepository` unless the identifier has
    /// exactly two non-empty `/`-separated segments.
    pub fn from_identifier(identifier: &str) -> Result<Self, ModerationError> {
        let invalid = || ModerationError::InvalidRepository {
            identifier: identifier.to_owned(),
        };

        let mut segments = identifier.trim().split('/');
        let owner = segments
            .next()
            .and_then(RepositoryOwner::new)
            .ok_or_else(invalid)?;
        let repository = segments
            .next()
            .and_then(RepositoryName::new)
            .ok_or_else(invalid)?;
        if segments.next().is_some() {
            return Err(invalid());
        }

        let api_base = Url::parse(DEFAULT_API_BASE)
            .map_err(|error| ModerationError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base,
            owner,
            repository,
        })
    }

    /// Replaces the API base, e.g. for GitHub Enterprise or a test server.
    ///
    /// # Errors
    ///
    /// Returns `ModerationError::InvalidUrl` when `api_base` cannot be parsed.
    pub fn with_api_base(self, api_base: &str) -> Result<Self, ModerationError> {
        let parsed =
            Url::parse(api_base).map_err(|error| ModerationError::InvalidUrl(error.to_string()))?;
        Ok(Self {
            api_base: parsed,
            ..self
        })
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }
}

impl fmt::Display for RepositoryLocator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}/{}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}
