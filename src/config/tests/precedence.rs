//! Tests for configuration layer precedence.

use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::{apply_layer, build_config_from_layers};
use crate::SpamSweeperConfig;

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"repository": "default/repo"})), ("file", json!({"repository": "file/repo"}))],
    "repository",
    "file/repo",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"token": "file-token"})), ("environment", json!({"token": "env-token"}))],
    "token",
    "env-token",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"repository": "env/repo"})), ("cli", json!({"repository": "cli/repo"}))],
    "repository",
    "cli/repo",
    "CLI should override environment"
)]
#[case::classifier_url_defaults_file_env_cli(
    vec![
        ("defaults", json!({"classifier_url": "http://default/predict"})),
        ("file", json!({"classifier_url": "http://file/predict"})),
        ("environment", json!({"classifier_url": "http://env/predict"})),
        ("cli", json!({"classifier_url": "http://cli/predict"}))
    ],
    "classifier_url",
    "http://cli/predict",
    "CLI should win for classifier_url"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value);
    }

    let config =
        SpamSweeperConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

    let actual = match field {
        "repository" => config.repository.as_deref(),
        "token" => config.token.as_deref(),
        "classifier_url" => config.classifier_url.as_deref(),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn defaults_apply_when_no_sources_provided() {
    let mut composer = MergeComposer::new();
    composer.push_defaults(json!({"repository": null, "token": null}));

    let config = SpamSweeperConfig::merge_from_layers(composer.layers())
        .expect("merge should succeed with empty defaults");

    assert!(config.repository.is_none(), "repository should be None");
    assert!(config.token.is_none(), "token should be None");
    assert!(!config.dry_run, "dry_run should default to false");
    assert!(!config.reset_cursors, "reset_cursors should default to false");
    assert_eq!(
        config.request_timeout_seconds, 30,
        "request_timeout_seconds should default to 30 seconds when unset"
    );
}

#[rstest]
fn full_precedence_chain() {
    let mut composer = MergeComposer::new();
    composer.push_defaults(json!({"repository": "default/repo", "token": "default-token"}));
    composer.push_file(
        json!({"repository": "file/repo", "token": "file-token", "kinds": "issue"}),
        None,
    );
    composer.push_environment(json!({"repository": "env/repo"}));
    composer.push_cli(json!({"repository": "cli/repo"}));

    let config =
        SpamSweeperConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

    assert_eq!(
        config.repository.as_deref(),
        Some("cli/repo"),
        "CLI wins for repository"
    );
    assert_eq!(
        config.token.as_deref(),
        Some("file-token"),
        "file wins for token (no env/cli override)"
    );
    assert_eq!(config.kinds.as_deref(), Some("issue"));
}

#[rstest]
fn switches_follow_layer_precedence() {
    let config = build_config_from_layers(&[
        ("defaults", json!({"dry_run": false, "reset_cursors": false})),
        ("file", json!({"dry_run": true, "reset_cursors": true})),
        ("cli", json!({"reset_cursors": false})),
    ]);

    assert!(config.dry_run, "file layer should enable dry_run");
    assert!(!config.reset_cursors, "CLI layer should win for reset_cursors");
}

#[rstest]
fn request_timeout_cli_overrides_file() {
    let config = build_config_from_layers(&[
        ("file", json!({"request_timeout_seconds": 5})),
        ("cli", json!({"request_timeout_seconds": 90})),
    ]);

    assert_eq!(config.request_timeout_seconds, 90);
}
