//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.spam-sweeper.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `SPAM_SWEEPER_REPOSITORY`,
//!    `SPAM_SWEEPER_TOKEN`, and friends
//! 4. **Command-line arguments** – `--repository`/`-r`, `--token`/`-t`, …
//!
//! The repository, token, and cursor file also fall back to the
//! `GITHUB_REPOSITORY`, `GITHUB_TOKEN`, and `CURSOR_FILE` variables set by
//! CI runners.
//!
//! # Configuration File
//!
//! ```toml
//! repository = "octocat/hello-world"
//! classifier_url = "http://127.0.0.1:8000/predict"
//! cursor_file = ".spam-sweeper/cursors.json"
//! request_timeout_seconds = 30
//! kinds = "discussion,issue"
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::classifier::{DEFAULT_CLASSIFIER_URL, HttpSpamClassifierConfig};
use crate::github::{ContainerKind, DEFAULT_API_BASE, ModerationError, RepositoryLocator};
use crate::moderation::ModerationOptions;
use crate::persistence::DEFAULT_CURSOR_FILE;

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use spam_sweeper::SpamSweeperConfig;
///
/// let config = SpamSweeperConfig::load().expect("failed to load configuration");
/// let locator = config.repository_locator().expect("repository required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "SPAM_SWEEPER",
    discovery(
        dotfile_name = ".spam-sweeper.toml",
        config_file_name = "spam-sweeper.toml",
        app_name = "spam-sweeper"
    )
)]
pub struct SpamSweeperConfig {
    /// Repository to moderate, as `owner/repo`.
    ///
    /// Can be provided via:
    /// - CLI: `--repository <OWNER/REPO>` or `-r <OWNER/REPO>`
    /// - Environment: `SPAM_SWEEPER_REPOSITORY` or `GITHUB_REPOSITORY`
    /// - Config file: `repository = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repository: Option<String>,

    /// Personal access token allowed to minimize comments.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `SPAM_SWEEPER_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise or test servers.
    #[ortho_config(cli_short = 'a')]
    pub api_base: Option<String>,

    /// Spam prediction endpoint.
    ///
    /// Can be provided via:
    /// - CLI: `--classifier-url <URL>` or `-c <URL>`
    /// - Environment: `SPAM_SWEEPER_CLASSIFIER_URL`
    /// - Config file: `classifier_url = "..."`
    #[ortho_config(cli_short = 'c')]
    pub classifier_url: Option<String>,

    /// Bearer token sent to the prediction endpoint, if it requires one.
    #[ortho_config(cli_short = 'K')]
    pub classifier_api_key: Option<String>,

    /// Path of the JSON file holding resumption cursors.
    ///
    /// Falls back to the `CURSOR_FILE` environment variable, then to
    /// `.spam-sweeper/cursors.json`.
    #[ortho_config(cli_short = 'f')]
    pub cursor_file: Option<String>,

    /// Timeout applied to every GitHub and classifier request, in seconds.
    #[ortho_config(cli_short = 'T')]
    pub request_timeout_seconds: u64,

    /// Comma-separated container kinds to crawl. All kinds when unset.
    ///
    /// Can be provided via:
    /// - CLI: `--kinds <LIST>` or `-k <LIST>`
    /// - Environment: `SPAM_SWEEPER_KINDS`
    /// - Config file: `kinds = "discussion,issue"`
    #[ortho_config(cli_short = 'k')]
    pub kinds: Option<String>,

    /// Classifies and reports without minimizing or saving cursors.
    ///
    /// Can be provided via:
    /// - CLI: `--dry-run` / `-n`
    /// - Config file: `dry_run = true`
    ///
    /// Note: `ortho_config` does not load boolean values from the environment.
    #[ortho_config(cli_short = 'n')]
    pub dry_run: bool,

    /// Ignores saved cursors and crawls every kind from the beginning.
    #[ortho_config(cli_short = 'R')]
    pub reset_cursors: bool,

    /// Writes structured audit events to stderr as JSON lines.
    #[ortho_config(cli_short = 'l')]
    pub audit_log: bool,
}

impl Default for SpamSweeperConfig {
    fn default() -> Self {
        Self {
            repository: None,
            token: None,
            api_base: None,
            classifier_url: None,
            classifier_api_key: None,
            cursor_file: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            kinds: None,
            dry_run: false,
            reset_cursors: false,
            audit_log: false,
        }
    }
}

impl SpamSweeperConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ModerationError::MissingToken`] when no token source provides
    /// a value.
    pub fn resolve_token(&self) -> Result<String, ModerationError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .filter(|token| !token.trim().is_empty())
            .ok_or(ModerationError::MissingToken)
    }

    /// Resolves the `owner/repo` identifier from configuration or the
    /// `GITHUB_REPOSITORY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ModerationError::MissingRepository`] when no source provides
    /// a value.
    pub fn require_repository(&self) -> Result<String, ModerationError> {
        self.repository
            .clone()
            .or_else(|| env::var("GITHUB_REPOSITORY").ok())
            .filter(|repository| !repository.trim().is_empty())
            .ok_or(ModerationError::MissingRepository)
    }

    /// Builds the repository locator, honouring `api_base`.
    ///
    /// # Errors
    ///
    /// Returns [`ModerationError::MissingRepository`],
    /// [`ModerationError::InvalidRepository`], or
    /// [`ModerationError::InvalidUrl`].
    pub fn repository_locator(&self) -> Result<RepositoryLocator, ModerationError> {
        let identifier = self.require_repository()?;
        RepositoryLocator::from_identifier(&identifier)?.with_api_base(self.api_base())
    }

    /// GitHub API base URL.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// Spam prediction endpoint.
    #[must_use]
    pub fn classifier_url(&self) -> &str {
        self.classifier_url
            .as_deref()
            .unwrap_or(DEFAULT_CLASSIFIER_URL)
    }

    /// Location of the cursor file.
    #[must_use]
    pub fn cursor_path(&self) -> Utf8PathBuf {
        self.cursor_file
            .clone()
            .or_else(|| env::var("CURSOR_FILE").ok())
            .map_or_else(|| Utf8PathBuf::from(DEFAULT_CURSOR_FILE), Utf8PathBuf::from)
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Container kinds to crawl, in crawl order and without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`ModerationError::Configuration`] when a kind is unknown or
    /// the list is empty.
    pub fn container_kinds(&self) -> Result<Vec<ContainerKind>, ModerationError> {
        let Some(raw) = self.kinds.as_deref() else {
            return Ok(ContainerKind::ALL.to_vec());
        };

        let mut kinds = Vec::new();
        for name in raw.split(',').filter(|name| !name.trim().is_empty()) {
            let kind: ContainerKind = name.parse()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }

        if kinds.is_empty() {
            return Err(ModerationError::Configuration {
                message: "kinds must name at least one of discussion, issue, or pull_request"
                    .to_owned(),
            });
        }
        Ok(kinds)
    }

    /// Classifier endpoint configuration.
    #[must_use]
    pub fn classifier_config(&self) -> HttpSpamClassifierConfig {
        let config = HttpSpamClassifierConfig::new(self.classifier_url(), self.request_timeout());
        let Some(api_key) = self.classifier_api_key.as_deref() else {
            return config;
        };
        config.with_api_key(api_key)
    }

    /// Crawl switches derived from this configuration.
    #[must_use]
    pub fn moderation_options(&self) -> ModerationOptions {
        ModerationOptions {
            dry_run: self.dry_run,
            reset_cursors: self.reset_cursors,
            ..ModerationOptions::default()
        }
    }

    /// Validates configuration consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ModerationError::Configuration`] when the timeout is zero or
    /// the kinds list is invalid.
    pub fn validate(&self) -> Result<(), ModerationError> {
        if self.request_timeout_seconds == 0 {
            return Err(ModerationError::Configuration {
                message: "request_timeout_seconds must be greater than zero".to_owned(),
            });
        }
        self.container_kinds().map(|_| ())
    }
}

#[cfg(test)]
mod tests;
