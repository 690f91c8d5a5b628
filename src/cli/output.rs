//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use spam_sweeper::{CommentOutcome, ModerationError, ModerationReport};

/// Writes one line per classified comment followed by a per-kind summary and
/// the list of minimized comment ids.
///
/// # Errors
///
/// Returns [`ModerationError::Io`] when the writer fails.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &ModerationReport,
    dry_run: bool,
) -> Result<(), ModerationError> {
    for classification in &report.classifications {
        writeln!(
            writer,
            "[{}] {}: {}",
            classification.kind,
            classification.comment_id,
            describe(&classification.outcome, dry_run)
        )
        .map_err(|e| io_error(&e))?;
    }

    if !report.classifications.is_empty() {
        writeln!(writer).map_err(|e| io_error(&e))?;
    }

    for summary in &report.kinds {
        let status = summary
            .aborted
            .as_deref()
            .map_or_else(|| "completed".to_owned(), |reason| format!("aborted: {reason}"));
        writeln!(
            writer,
            "{}: {} classified, {} already hidden, {} malformed, {} incomplete, {} classifier failures, {} spam, {} minimized ({status})",
            summary.kind,
            summary.comments_classified,
            summary.already_minimized,
            summary.malformed,
            summary.incomplete_containers,
            summary.classifier_failures,
            summary.spam_detected,
            summary.minimized
        )
        .map_err(|e| io_error(&e))?;
    }

    let minimized: Vec<&str> = report.minimized_ids().map(|id| id.as_str()).collect();
    if minimized.is_empty() {
        writeln!(writer, "Minimized comments: none").map_err(|e| io_error(&e))?;
    } else {
        writeln!(writer, "Minimized comments: {}", minimized.join(", "))
            .map_err(|e| io_error(&e))?;
    }

    Ok(())
}

fn describe(outcome: &CommentOutcome, dry_run: bool) -> String {
    match outcome {
        CommentOutcome::AlreadyMinimized => "already hidden".to_owned(),
        CommentOutcome::NotSpam => "not spam".to_owned(),
        CommentOutcome::ClassifierFailed { reason } => {
            format!("classifier failed, left visible ({reason})")
        }
        CommentOutcome::Spam { .. } if dry_run => "spam (dry run, not minimized)".to_owned(),
        CommentOutcome::Spam { minimized: true } => "spam, minimized".to_owned(),
        CommentOutcome::Spam { minimized: false } => "spam, minimize failed".to_owned(),
    }
}

fn io_error(error: &io::Error) -> ModerationError {
    ModerationError::Io {
        message: error.to_string(),
    }
}
