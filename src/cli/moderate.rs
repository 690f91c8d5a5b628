//! Moderation run operation.

use std::io::{self, Write};
use std::time::Duration;

use spam_sweeper::{
    CommentGateway, HttpSpamClassifier, HttpSpamClassifierConfig, JsonFileCursorStore,
    ModerationContext, ModerationError, ModerationReport, NoopTelemetrySink,
    OctocrabCommentGateway, PersonalAccessToken, RepositoryLocator, SpamClassifier,
    SpamSweeperConfig, StderrJsonlTelemetrySink, TelemetrySink, moderate,
};

use super::output::write_report;

/// Moderates the configured repository and prints the report to stdout.
///
/// # Errors
///
/// Returns [`ModerationError::MissingRepository`],
/// [`ModerationError::MissingToken`], or [`ModerationError::Configuration`]
/// when required configuration is missing or invalid. Failures while
/// crawling are recorded in the report instead.
pub async fn run(config: &SpamSweeperConfig) -> Result<(), ModerationError> {
    let report = run_with_builders(
        config,
        OctocrabCommentGateway::for_token,
        HttpSpamClassifier::new,
    )
    .await?;

    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, &report, config.dry_run)?;
    stdout.flush().map_err(|error| ModerationError::Io {
        message: error.to_string(),
    })
}

/// Runs moderation using custom gateway and classifier builders.
///
/// This function is exposed for testing with fake collaborators.
pub async fn run_with_builders<G, C, FG, FC>(
    config: &SpamSweeperConfig,
    build_gateway: FG,
    build_classifier: FC,
) -> Result<ModerationReport, ModerationError>
where
    G: CommentGateway,
    C: SpamClassifier,
    FG: FnOnce(&PersonalAccessToken, &RepositoryLocator, Duration) -> Result<G, ModerationError>,
    FC: FnOnce(HttpSpamClassifierConfig) -> Result<C, ModerationError>,
{
    config.validate()?;
    let locator = config.repository_locator()?;
    let token = PersonalAccessToken::new(config.resolve_token()?)?;
    let kinds = config.container_kinds()?;

    let gateway = build_gateway(&token, &locator, config.request_timeout())?;
    let classifier = build_classifier(config.classifier_config())?;
    let cursors = JsonFileCursorStore::new(config.cursor_path());
    let telemetry: Box<dyn TelemetrySink> = if config.audit_log {
        Box::new(StderrJsonlTelemetrySink)
    } else {
        Box::new(NoopTelemetrySink)
    };

    tracing::info!(
        "moderating {locator} (cursor file {}, dry run {})",
        cursors.path(),
        config.dry_run
    );

    let context = ModerationContext {
        locator: &locator,
        gateway: &gateway,
        classifier: &classifier,
        cursors: &cursors,
        telemetry: telemetry.as_ref(),
        options: config.moderation_options(),
    };
    Ok(moderate(&context, &kinds).await)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use rstest::rstest;
    use spam_sweeper::github::models::test_support::{comment, container, container_page};
    use spam_sweeper::github::{
        CommentId, CommentPage, CommentPageRequest, ContainerPage, ContainerPageRequest, Decoded,
    };
    use spam_sweeper::{
        CommentGateway, ContainerKind, CursorStore, JsonFileCursorStore, ModerationError,
        RepositoryLocator, SpamClassifier, SpamSweeperConfig,
    };

    use super::run_with_builders;

    /// Serves one discussion page and records the calls it receives.
    #[derive(Clone, Default)]
    struct CapturingGateway {
        requests: Arc<Mutex<Vec<(RepositoryLocator, ContainerPageRequest)>>>,
        minimized: Arc<Mutex<Vec<CommentId>>>,
    }

    #[async_trait]
    impl CommentGateway for CapturingGateway {
        async fn container_page(
            &self,
            locator: &RepositoryLocator,
            request: &ContainerPageRequest,
        ) -> Result<ContainerPage, ModerationError> {
            self.requests
                .lock()
                .expect("requests mutex should be available")
                .push((locator.clone(), request.clone()));

            if request.after.is_some() {
                return Ok(container_page(request.kind, Vec::new(), false, None));
            }
            Ok(container_page(
                request.kind,
                vec![Decoded::Valid(container(
                    "D_1",
                    vec![comment("DC_1", "hello"), comment("DC_2", "spam offer")],
                ))],
                false,
                Some("d-1"),
            ))
        }

        async fn comment_page(
            &self,
            _request: &CommentPageRequest,
        ) -> Result<CommentPage, ModerationError> {
            Err(ModerationError::Api {
                message: "comment pages are not scripted".to_owned(),
            })
        }

        async fn minimize_comment(&self, comment_id: &CommentId) -> Result<bool, ModerationError> {
            self.minimized
                .lock()
                .expect("minimized mutex should be available")
                .push(comment_id.clone());
            Ok(true)
        }
    }

    struct KeywordClassifier;

    #[async_trait]
    impl SpamClassifier for KeywordClassifier {
        async fn is_spam(&self, text: &str) -> Result<bool, ModerationError> {
            Ok(text.contains("spam"))
        }
    }

    fn config_in(dir: &tempfile::TempDir) -> SpamSweeperConfig {
        SpamSweeperConfig {
            repository: Some("octo/repo".to_owned()),
            token: Some("ghp_example".to_owned()),
            cursor_file: Some(
                dir.path()
                    .join("cursors.json")
                    .to_string_lossy()
                    .into_owned(),
            ),
            kinds: Some("discussion".to_owned()),
            request_timeout_seconds: 9,
            ..Default::default()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn run_minimizes_spam_and_persists_cursor() {
        let dir = tempfile::TempDir::new().expect("temp dir should be created");
        let config = config_in(&dir);
        let gateway = CapturingGateway::default();
        let captured_timeout = Arc::new(Mutex::new(None));
        let timeout_slot = Arc::clone(&captured_timeout);
        let builder_gateway = gateway.clone();

        let report = run_with_builders(
            &config,
            move |_token, _locator, timeout| {
                timeout_slot
                    .lock()
                    .expect("timeout mutex should be available")
                    .replace(timeout);
                Ok(builder_gateway)
            },
            |_config| Ok(KeywordClassifier),
        )
        .await
        .expect("run should succeed");

        assert_eq!(
            report.minimized_ids().collect::<Vec<_>>(),
            vec![&CommentId::new("DC_2")]
        );
        assert_eq!(
            *captured_timeout
                .lock()
                .expect("timeout mutex should be available"),
            Some(Duration::from_secs(9))
        );
        let store = JsonFileCursorStore::new(config.cursor_path());
        let state = store.load().expect("cursor file should load");
        assert_eq!(
            state
                .get(ContainerKind::Discussion)
                .map(|cursor| cursor.as_str()),
            Some("d-1")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn second_run_resumes_from_cursor_file() {
        let dir = tempfile::TempDir::new().expect("temp dir should be created");
        let config = config_in(&dir);
        let gateway = CapturingGateway::default();

        for _ in 0..2 {
            let builder_gateway = gateway.clone();
            run_with_builders(
                &config,
                move |_token, _locator, _timeout| Ok(builder_gateway),
                |_config| Ok(KeywordClassifier),
            )
            .await
            .expect("run should succeed");
        }

        let requests = gateway
            .requests
            .lock()
            .expect("requests mutex should be available")
            .clone();
        let afters: Vec<Option<String>> = requests
            .iter()
            .map(|(_, request)| request.after.as_ref().map(ToString::to_string))
            .collect();
        assert_eq!(afters, vec![None, Some("d-1".to_owned())]);
        assert_eq!(
            gateway
                .minimized
                .lock()
                .expect("minimized mutex should be available")
                .len(),
            1
        );
    }

    #[rstest]
    #[tokio::test]
    async fn missing_repository_fails_before_building_collaborators() {
        let _guard = env_lock::lock_env([("GITHUB_REPOSITORY", None::<&str>)]);
        let config = SpamSweeperConfig {
            token: Some("ghp_example".to_owned()),
            ..Default::default()
        };

        let result = run_with_builders(
            &config,
            |_token, _locator, _timeout| -> Result<CapturingGateway, ModerationError> {
                panic!("gateway must not be built without a repository")
            },
            |_config| -> Result<KeywordClassifier, ModerationError> {
                panic!("classifier must not be built without a repository")
            },
        )
        .await;

        assert!(matches!(result, Err(ModerationError::MissingRepository)));
    }

    #[rstest]
    #[tokio::test]
    async fn classifier_builder_receives_configured_endpoint() {
        let dir = tempfile::TempDir::new().expect("temp dir should be created");
        let config = SpamSweeperConfig {
            classifier_url: Some("http://classifier.test/predict".to_owned()),
            ..config_in(&dir)
        };
        let gateway = CapturingGateway::default();

        let result = run_with_builders(
            &config,
            move |_token, _locator, _timeout| Ok(gateway),
            |classifier_config| -> Result<KeywordClassifier, ModerationError> {
                Err(ModerationError::Configuration {
                    message: classifier_config.endpoint,
                })
            },
        )
        .await;

        assert_eq!(
            result.err(),
            Some(ModerationError::Configuration {
                message: "http://classifier.test/predict".to_owned(),
            })
        );
    }
}
