//! Outcome of a moderation run.

use crate::github::{CommentId, ContainerKind, CursorToken};

/// A comment the classifier flagged as spam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentResult {
    /// Kind of the owning container.
    pub kind: ContainerKind,
    /// Node identifier of the comment.
    pub comment_id: CommentId,
    /// Whether GitHub now reports the comment as hidden.
    pub minimized: bool,
}

/// How one comment was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOutcome {
    /// Hidden before the run; not sent to the classifier.
    AlreadyMinimized,
    /// Classified as legitimate.
    NotSpam,
    /// The classifier failed, so the comment was left visible.
    ClassifierFailed {
        /// Classifier error.
        reason: String,
    },
    /// Classified as spam.
    Spam {
        /// Whether GitHub now reports the comment as hidden.
        minimized: bool,
    },
}

/// Classification of one comment seen during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentClassification {
    /// Kind of the owning container.
    pub kind: ContainerKind,
    /// Node identifier of the comment.
    pub comment_id: CommentId,
    /// What happened to the comment.
    pub outcome: CommentOutcome,
}

/// Counters for one container kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindSummary {
    /// Container kind these counters describe.
    pub kind: ContainerKind,
    /// Container pages fetched.
    pub pages: usize,
    /// Well-formed containers scanned.
    pub containers: usize,
    /// Comments passed to the classifier.
    pub comments_classified: usize,
    /// Comments skipped because they were already hidden.
    pub already_minimized: usize,
    /// Containers and comments skipped because required fields were missing.
    pub malformed: usize,
    /// Containers whose later comment pages could not be fetched.
    pub incomplete_containers: usize,
    /// Comments let through because the classifier failed.
    pub classifier_failures: usize,
    /// Comments classified as spam.
    pub spam_detected: usize,
    /// Spam comments GitHub confirmed as minimized.
    pub minimized: usize,
    /// Cursor after the last fully processed page of this run.
    pub final_cursor: Option<CursorToken>,
    /// Error that stopped this kind early, if any.
    pub aborted: Option<String>,
}

impl KindSummary {
    /// Zeroed counters for `kind`.
    #[must_use]
    pub const fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            pages: 0,
            containers: 0,
            comments_classified: 0,
            already_minimized: 0,
            malformed: 0,
            incomplete_containers: 0,
            classifier_failures: 0,
            spam_detected: 0,
            minimized: 0,
            final_cursor: None,
            aborted: None,
        }
    }

    /// Returns true when the kind was crawled to its last page.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Per-kind counters plus every comment outcome, in crawl order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationReport {
    /// One summary per requested kind, in request order.
    pub kinds: Vec<KindSummary>,
    /// Spam comments found during the run.
    pub results: Vec<CommentResult>,
    /// Every comment seen during the run, spam or not.
    pub classifications: Vec<CommentClassification>,
}

impl ModerationReport {
    /// Summary for `kind`, if it was requested.
    #[must_use]
    pub fn summary(&self, kind: ContainerKind) -> Option<&KindSummary> {
        self.kinds.iter().find(|summary| summary.kind == kind)
    }

    /// Identifiers of comments that were actually minimized.
    pub fn minimized_ids(&self) -> impl Iterator<Item = &CommentId> {
        self.results
            .iter()
            .filter(|result| result.minimized)
            .map(|result| &result.comment_id)
    }

    /// Returns true when any kind stopped before its last page.
    #[must_use]
    pub fn has_aborted_kinds(&self) -> bool {
        self.kinds.iter().any(|summary| !summary.completed())
    }
}
