//! Spam classification seam.
//!
//! The crawler treats classification as a black-box predicate over comment
//! text. [`HttpSpamClassifier`] asks a remote prediction endpoint; tests use
//! the generated mock or small hand-written stubs.

mod remote;

pub use remote::{DEFAULT_CLASSIFIER_URL, HttpSpamClassifier, HttpSpamClassifierConfig};

use async_trait::async_trait;

use crate::github::ModerationError;

/// Predicate deciding whether comment text is spam.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpamClassifier: Send + Sync {
    /// Classify one comment body.
    ///
    /// # Errors
    ///
    /// Returns [`ModerationError::Classifier`] or
    /// [`ModerationError::Network`] when no verdict could be obtained.
    async fn is_spam(&self, text: &str) -> Result<bool, ModerationError>;
}

/// Verdict for one comment after applying the fail-open policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The classifier flagged the comment.
    Spam,
    /// The classifier cleared the comment.
    NotSpam,
    /// The classifier failed; the comment is treated as not spam.
    FailedOpen {
        /// Error reported by the classifier.
        reason: String,
    },
}

impl Verdict {
    /// Returns true only for a positive classifier verdict.
    #[must_use]
    pub const fn is_spam(&self) -> bool {
        matches!(self, Self::Spam)
    }
}

/// Classify text, converting any classifier failure into
/// [`Verdict::FailedOpen`] so legitimate content is never hidden because the
/// classifier was unavailable.
pub async fn classify_failing_open(classifier: &dyn SpamClassifier, text: &str) -> Verdict {
    match classifier.is_spam(text).await {
        Ok(true) => Verdict::Spam,
        Ok(false) => Verdict::NotSpam,
        Err(error) => Verdict::FailedOpen {
            reason: error.to_string(),
        },
    }
}
