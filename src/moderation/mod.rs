//! Paginated crawl-and-minimize loop.
//!
//! For each container kind the crawler repeatedly fetches a page of
//! containers starting after the saved cursor, follows every container's
//! comment pagination to the end, classifies each unminimized comment once,
//! and minimizes positives. The kind's cursor is persisted only after a whole
//! page has been processed, so a crash re-fetches at most the in-flight page.
//!
//! Failures are contained. A malformed container or comment is skipped, and a
//! container whose later comment pages cannot be fetched is cut short. A
//! failed container page stops only that kind; classifier failures fail open.

mod report;

pub use report::{
    CommentClassification, CommentOutcome, CommentResult, KindSummary, ModerationReport,
};

use std::collections::HashSet;

use crate::classifier::{SpamClassifier, Verdict, classify_failing_open};
use crate::github::{
    Comment, CommentGateway, CommentId, CommentPage, CommentPageRequest, Container, ContainerKind,
    ContainerPageRequest, CursorToken, Decoded, ModerationError, PageInfo, RepositoryLocator,
};
use crate::persistence::{CursorState, CursorStore};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Containers per page, and comments per container page.
pub const DEFAULT_PAGE_SIZE: u8 = 10;

/// Behavioural switches for a moderation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModerationOptions {
    /// Page size used for containers and their comments.
    pub page_size: u8,
    /// Classify and report without minimizing or persisting cursors.
    pub dry_run: bool,
    /// Ignore saved cursors and start every kind from the beginning.
    pub reset_cursors: bool,
}

impl Default for ModerationOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            dry_run: false,
            reset_cursors: false,
        }
    }
}

/// Everything a moderation run talks to.
///
/// The credential lives inside the gateway; nothing here touches global state,
/// so tests can substitute every collaborator.
pub struct ModerationContext<'run> {
    /// Repository being moderated.
    pub locator: &'run RepositoryLocator,
    /// GitHub access.
    pub gateway: &'run dyn CommentGateway,
    /// Spam predicate.
    pub classifier: &'run dyn SpamClassifier,
    /// Resumption cursor storage.
    pub cursors: &'run dyn CursorStore,
    /// Audit event sink.
    pub telemetry: &'run dyn TelemetrySink,
    /// Run options.
    pub options: ModerationOptions,
}

/// Moderates every requested container kind in order.
///
/// Never fails as a whole: per-kind failures are recorded in the returned
/// report's [`KindSummary::aborted`].
pub async fn moderate(
    context: &ModerationContext<'_>,
    kinds: &[ContainerKind],
) -> ModerationReport {
    let mut run = Run {
        context,
        seen: HashSet::new(),
        results: Vec::new(),
        classifications: Vec::new(),
    };
    let mut summaries = Vec::with_capacity(kinds.len());

    for &kind in kinds {
        let mut summary = KindSummary::new(kind);
        tracing::info!("moderating {kind} comments in {}", context.locator);

        if let Err(error) = run.crawl_kind(kind, &mut summary).await {
            tracing::warn!("stopped crawling {kind} comments: {error}");
            context.telemetry.record(TelemetryEvent::CrawlAborted {
                kind,
                reason: error.to_string(),
            });
            summary.aborted = Some(error.to_string());
        }

        tracing::info!(
            "{kind}: {} pages, {} comments classified, {} spam, {} minimized",
            summary.pages,
            summary.comments_classified,
            summary.spam_detected,
            summary.minimized
        );
        summaries.push(summary);
    }

    ModerationReport {
        kinds: summaries,
        results: run.results,
        classifications: run.classifications,
    }
}

struct Run<'ctx, 'run> {
    context: &'ctx ModerationContext<'run>,
    seen: HashSet<CommentId>,
    results: Vec<CommentResult>,
    classifications: Vec<CommentClassification>,
}

impl Run<'_, '_> {
    async fn crawl_kind(
        &mut self,
        kind: ContainerKind,
        summary: &mut KindSummary,
    ) -> Result<(), ModerationError> {
        let mut state = self.load_cursors();
        let mut after = if self.context.options.reset_cursors {
            None
        } else {
            state.get(kind).cloned()
        };
        if let Some(cursor) = after.as_ref() {
            tracing::info!("resuming {kind} crawl after cursor {cursor}");
        }

        loop {
            let request = ContainerPageRequest {
                kind,
                first: self.context.options.page_size,
                after: after.clone(),
            };
            let page = self
                .context
                .gateway
                .container_page(self.context.locator, &request)
                .await?;
            summary.pages += 1;

            for entry in page.containers {
                match entry {
                    Decoded::Valid(container) => {
                        self.process_container(kind, container, summary).await;
                    }
                    Decoded::Malformed { reason } => {
                        tracing::warn!("skipping malformed {kind}: {reason}");
                        summary.malformed += 1;
                    }
                }
            }

            let has_next_page = page.page_info.has_next_page();
            let Some(end_cursor) = page.page_info.end_cursor().cloned() else {
                if has_next_page {
                    return Err(ModerationError::MalformedResponse {
                        message: format!("{kind} page reported more results without an end cursor"),
                    });
                }
                return Ok(());
            };

            if has_next_page && after.as_ref() == Some(&end_cursor) {
                return Err(ModerationError::MalformedResponse {
                    message: format!("{kind} pagination did not advance past {end_cursor}"),
                });
            }

            self.advance_cursor(&mut state, kind, &end_cursor);
            summary.final_cursor = Some(end_cursor.clone());
            after = Some(end_cursor);

            if !has_next_page {
                return Ok(());
            }
        }
    }

    /// Scans every comment page of one container.
    ///
    /// A follow-up page that cannot be fetched ends this container only; the
    /// rest of the container page still runs and the cursor can advance.
    async fn process_container(
        &mut self,
        kind: ContainerKind,
        container: Container,
        summary: &mut KindSummary,
    ) {
        summary.containers += 1;
        let Container {
            id,
            title,
            comments: first_page,
        } = container;
        tracing::debug!("scanning {kind} {id} ({title})");

        let mut page = first_page;
        loop {
            let CommentPage {
                comments,
                page_info,
            } = page;

            for entry in comments {
                match entry {
                    Decoded::Valid(comment) => self.process_comment(kind, comment, summary).await,
                    Decoded::Malformed { reason } => {
                        tracing::warn!("skipping malformed comment on {kind} {id}: {reason}");
                        summary.malformed += 1;
                    }
                }
            }

            if !page_info.has_next_page() {
                return;
            }
            page = match self.next_comment_page(kind, &id, &page_info).await {
                Ok(next) => next,
                Err(error) => {
                    self.record_incomplete(kind, &id, &error, summary);
                    return;
                }
            };
        }
    }

    async fn next_comment_page(
        &self,
        kind: ContainerKind,
        container_id: &str,
        page_info: &PageInfo,
    ) -> Result<CommentPage, ModerationError> {
        let after = page_info.end_cursor().cloned().ok_or_else(|| {
            ModerationError::MalformedResponse {
                message: "comment page reported more results without an end cursor".to_owned(),
            }
        })?;

        let request = CommentPageRequest {
            kind,
            container_id: container_id.to_owned(),
            first: self.context.options.page_size,
            after,
        };
        self.context.gateway.comment_page(&request).await
    }

    fn record_incomplete(
        &self,
        kind: ContainerKind,
        container_id: &str,
        error: &ModerationError,
        summary: &mut KindSummary,
    ) {
        tracing::warn!("skipping remaining comments of {kind} {container_id}: {error}");
        summary.incomplete_containers += 1;
        self.context
            .telemetry
            .record(TelemetryEvent::ContainerIncomplete {
                kind,
                container_id: container_id.to_owned(),
                reason: error.to_string(),
            });
    }

    async fn process_comment(
        &mut self,
        kind: ContainerKind,
        comment: Comment,
        summary: &mut KindSummary,
    ) {
        if comment.is_minimized {
            tracing::debug!("{kind} comment {} is already minimized", comment.id);
            summary.already_minimized += 1;
            self.classify_as(kind, comment.id, CommentOutcome::AlreadyMinimized);
            return;
        }
        if !self.seen.insert(comment.id.clone()) {
            tracing::debug!("{kind} comment {} was already classified this run", comment.id);
            return;
        }

        summary.comments_classified += 1;
        let verdict = classify_failing_open(self.context.classifier, &comment.body).await;
        self.record_verdict(kind, &comment.id, &verdict, summary);

        let outcome = match verdict {
            Verdict::NotSpam => CommentOutcome::NotSpam,
            Verdict::FailedOpen { reason } => CommentOutcome::ClassifierFailed { reason },
            Verdict::Spam => {
                summary.spam_detected += 1;
                let minimized = self.minimize(kind, &comment.id).await;
                if minimized {
                    summary.minimized += 1;
                }
                self.results.push(CommentResult {
                    kind,
                    comment_id: comment.id.clone(),
                    minimized,
                });
                CommentOutcome::Spam { minimized }
            }
        };
        self.classify_as(kind, comment.id, outcome);
    }

    fn classify_as(
        &mut self,
        kind: ContainerKind,
        comment_id: CommentId,
        outcome: CommentOutcome,
    ) {
        self.classifications.push(CommentClassification {
            kind,
            comment_id,
            outcome,
        });
    }

    fn record_verdict(
        &self,
        kind: ContainerKind,
        comment_id: &CommentId,
        verdict: &Verdict,
        summary: &mut KindSummary,
    ) {
        let event = match verdict {
            Verdict::FailedOpen { reason } => {
                tracing::warn!(
                    "classifier failed for {kind} comment {comment_id}, treating as not spam: {reason}"
                );
                summary.classifier_failures += 1;
                TelemetryEvent::ClassifierFailed {
                    kind,
                    comment_id: comment_id.to_string(),
                    reason: reason.clone(),
                }
            }
            Verdict::Spam | Verdict::NotSpam => {
                tracing::debug!(
                    "{kind} comment {comment_id} classified as {}",
                    if verdict.is_spam() { "spam" } else { "not spam" }
                );
                TelemetryEvent::CommentClassified {
                    kind,
                    comment_id: comment_id.to_string(),
                    spam: verdict.is_spam(),
                }
            }
        };
        self.context.telemetry.record(event);
    }

    async fn minimize(&self, kind: ContainerKind, comment_id: &CommentId) -> bool {
        if self.context.options.dry_run {
            tracing::info!("dry run: would minimize {kind} comment {comment_id}");
            return false;
        }

        let minimized = match self.context.gateway.minimize_comment(comment_id).await {
            Ok(true) => {
                tracing::info!("minimized {kind} comment {comment_id} as spam");
                true
            }
            Ok(false) => {
                tracing::warn!("GitHub did not report {kind} comment {comment_id} as minimized");
                false
            }
            Err(error) => {
                tracing::warn!("failed to minimize {kind} comment {comment_id}: {error}");
                false
            }
        };

        self.context.telemetry.record(TelemetryEvent::CommentMinimized {
            kind,
            comment_id: comment_id.to_string(),
            minimized,
        });
        minimized
    }

    fn load_cursors(&self) -> CursorState {
        self.context.cursors.load().unwrap_or_else(|error| {
            tracing::warn!("{error}; starting from the beginning");
            CursorState::default()
        })
    }

    fn advance_cursor(&self, state: &mut CursorState, kind: ContainerKind, cursor: &CursorToken) {
        if self.context.options.dry_run {
            tracing::debug!("dry run: not saving {kind} cursor {cursor}");
            return;
        }

        state.set(kind, cursor.clone());
        if let Err(error) = self.context.cursors.save(state) {
            tracing::warn!("{error}; the next run may re-check this page");
            return;
        }

        self.context.telemetry.record(TelemetryEvent::CursorAdvanced {
            kind,
            cursor: cursor.to_string(),
        });
    }
}
