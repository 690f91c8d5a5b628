//! Tests for field resolution methods (`resolve_token`, `require_repository`,
//! `repository_locator`, `cursor_path`, `classifier_config`).

use std::time::Duration;

use camino::Utf8PathBuf;
use rstest::rstest;

use crate::SpamSweeperConfig;
use crate::github::ModerationError;

#[rstest]
fn resolve_token_returns_value_when_present() {
    let config = SpamSweeperConfig {
        token: Some("my-token".to_owned()),
        ..Default::default()
    };

    let result = config.resolve_token();
    assert_eq!(
        result.ok(),
        Some("my-token".to_owned()),
        "should return the token"
    );
}

#[rstest]
fn resolve_token_falls_back_to_github_token() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("ci-token"))]);
    let config = SpamSweeperConfig::default();

    assert_eq!(config.resolve_token().ok(), Some("ci-token".to_owned()));
}

#[rstest]
fn resolve_token_returns_error_when_none() {
    // Lock and clear GITHUB_TOKEN to ensure test isolation
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
    let config = SpamSweeperConfig::default();

    let result = config.resolve_token();
    assert_eq!(result, Err(ModerationError::MissingToken));
}

#[rstest]
fn require_repository_falls_back_to_github_repository() {
    let _guard = env_lock::lock_env([("GITHUB_REPOSITORY", Some("octo/from-ci"))]);
    let config = SpamSweeperConfig::default();

    assert_eq!(
        config.require_repository().ok(),
        Some("octo/from-ci".to_owned())
    );
}

#[rstest]
fn configured_repository_wins_over_github_repository() {
    let _guard = env_lock::lock_env([("GITHUB_REPOSITORY", Some("octo/from-ci"))]);
    let config = SpamSweeperConfig {
        repository: Some("octo/configured".to_owned()),
        ..Default::default()
    };

    assert_eq!(
        config.require_repository().ok(),
        Some("octo/configured".to_owned())
    );
}

#[rstest]
fn require_repository_returns_error_when_none() {
    let _guard = env_lock::lock_env([("GITHUB_REPOSITORY", None::<&str>)]);
    let config = SpamSweeperConfig::default();

    assert_eq!(
        config.require_repository(),
        Err(ModerationError::MissingRepository)
    );
}

#[rstest]
fn repository_locator_honours_api_base() {
    let config = SpamSweeperConfig {
        repository: Some("octo/repo".to_owned()),
        api_base: Some("https://ghe.example.com/api".to_owned()),
        ..Default::default()
    };

    let locator = config
        .repository_locator()
        .expect("locator should build");

    assert_eq!(locator.to_string(), "octo/repo");
    assert_eq!(locator.api_base().as_str(), "https://ghe.example.com/api");
}

#[rstest]
fn repository_locator_rejects_malformed_identifier() {
    let config = SpamSweeperConfig {
        repository: Some("just-a-name".to_owned()),
        ..Default::default()
    };

    assert!(matches!(
        config.repository_locator(),
        Err(ModerationError::InvalidRepository { .. })
    ));
}

#[rstest]
fn cursor_path_prefers_configured_file() {
    let _guard = env_lock::lock_env([("CURSOR_FILE", Some("legacy.json"))]);
    let config = SpamSweeperConfig {
        cursor_file: Some("state/cursors.json".to_owned()),
        ..Default::default()
    };

    assert_eq!(config.cursor_path(), Utf8PathBuf::from("state/cursors.json"));
}

#[rstest]
#[case::legacy_variable(Some("legacy.json"), "legacy.json")]
#[case::default_location(None, ".spam-sweeper/cursors.json")]
fn cursor_path_falls_back(#[case] legacy: Option<&str>, #[case] expected: &str) {
    let _guard = env_lock::lock_env([("CURSOR_FILE", legacy)]);
    let config = SpamSweeperConfig::default();

    assert_eq!(config.cursor_path(), Utf8PathBuf::from(expected));
}

#[rstest]
fn classifier_config_carries_url_key_and_timeout() {
    let config = SpamSweeperConfig {
        classifier_url: Some("http://classifier.internal/predict".to_owned()),
        classifier_api_key: Some("secret".to_owned()),
        request_timeout_seconds: 7,
        ..Default::default()
    };

    let classifier = config.classifier_config();

    assert_eq!(classifier.endpoint, "http://classifier.internal/predict");
    assert_eq!(classifier.api_key.as_deref(), Some("secret"));
    assert_eq!(classifier.timeout, Duration::from_secs(7));
}

#[rstest]
fn classifier_config_omits_key_when_unset() {
    let config = SpamSweeperConfig::default();

    let classifier = config.classifier_config();

    assert_eq!(classifier.api_key, None);
    assert_eq!(classifier.endpoint, config.classifier_url());
}

#[rstest]
fn moderation_options_reflect_switches() {
    let config = SpamSweeperConfig {
        dry_run: true,
        reset_cursors: true,
        ..Default::default()
    };

    let options = config.moderation_options();

    assert!(options.dry_run);
    assert!(options.reset_cursors);
    assert_eq!(options.page_size, 10);
}
