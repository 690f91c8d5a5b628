//! Unit tests for the GitHub module's identity and pagination types.

use rstest::rstest;

use super::{ModerationError, PersonalAccessToken, RepositoryLocator};


#[rstest]
fn rejects_empty_token() {
    let result = PersonalAccessToken::new(String::new());
    assert!(
        matches!(result, Err(ModerationError::MissingToken)),
        "expected MissingToken, got {result:?}"
    );
}

#[rstest]
fn trims_token_whitespace() {
    let token = PersonalAccessToken::new("  ghp_example\n").expect("token should be valid");
    assert_eq!(token.value(), "ghp_example");
}

#[rstest]
fn token_debug_output_is_redacted() {
    let token = PersonalAccessToken::new("ghp_secret").expect("token should be valid");
    let rendered = format!("{token:?}");
    assert!(!rendered.contains("ghp_secret"), "token leaked: {rendered}");
}

#[rstest]
fn api_base_override_replaces_default() {
    let locator = RepositoryLocator::from_identifier("octo/repo")
        .and_then(|locator| locator.with_api_base("https://ghe.example.com/api"))
        .expect("locator should build");
    assert_eq!(locator.api_base().as_str(), "https://ghe.example.com/api");
    assert_eq!(locator.to_string(), "octo/repo");
}

#[rstest]
fn api_base_override_rejects_invalid_url() {
    let result = RepositoryLocator::from_identifier("octo/repo")
        .and_then(|locator| locator.with_api_base("not a url"));
    assert!(
        matches!(result, Err(ModerationError::InvalidUrl(_))),
        "expected InvalidUrl, got {result:?}"
    );
}
