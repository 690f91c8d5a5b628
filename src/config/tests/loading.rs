//! Tests for loading configuration from the environment and CLI arguments.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use rstest::rstest;

use crate::SpamSweeperConfig;

/// Loads configuration with an isolated home directory so no real dotfile is
/// discovered.
fn load_with(env_vars: &[(&str, Option<&str>)], cli_args: &[&str]) -> SpamSweeperConfig {
    let temp_dir = tempfile::TempDir::new().expect("temp dir should be created");
    let home = temp_dir.path().to_string_lossy().to_string();

    let mut vars: Vec<(&str, Option<&str>)> = vec![
        ("HOME", Some(home.as_str())),
        ("XDG_CONFIG_HOME", Some(home.as_str())),
    ];
    vars.extend_from_slice(env_vars);
    let _guard = env_lock::lock_env(vars);

    let mut args: Vec<OsString> = vec![OsString::from("spam-sweeper")];
    args.extend(cli_args.iter().map(OsString::from));

    SpamSweeperConfig::load_from_iter(args).expect("config should load")
}

#[rstest]
fn repository_loads_from_prefixed_environment_variable() {
    let config = load_with(&[("SPAM_SWEEPER_REPOSITORY", Some("octo/env"))], &[]);

    assert_eq!(config.repository.as_deref(), Some("octo/env"));
}

#[rstest]
fn short_flags_populate_repository_and_classifier() {
    let config = load_with(
        &[("SPAM_SWEEPER_REPOSITORY", None)],
        &["-r", "octo/cli", "-c", "http://localhost:9000/predict"],
    );

    assert_eq!(config.repository.as_deref(), Some("octo/cli"));
    assert_eq!(
        config.classifier_url.as_deref(),
        Some("http://localhost:9000/predict")
    );
}

#[rstest]
fn cli_flag_overrides_environment_timeout() {
    let config = load_with(
        &[("SPAM_SWEEPER_REQUEST_TIMEOUT_SECONDS", Some("12"))],
        &["--request-timeout-seconds", "45"],
    );

    assert_eq!(config.request_timeout_seconds, 45);
}

#[rstest]
fn dry_run_flag_is_read_from_cli() {
    let config = load_with(&[], &["--dry-run"]);

    assert!(config.dry_run, "--dry-run should enable dry runs");
}
