//! Moderation audit events and sinks.
//!
//! Every classification and moderation decision can be recorded as a
//! structured event, independent of human-oriented `tracing` output, so runs
//! can be audited after the fact (for example to review comments that were
//! let through because the classifier failed).

use std::io;

use serde::{Deserialize, Serialize};

use crate::github::ContainerKind;

/// A structured audit event emitted during a moderation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A comment received a verdict from the classifier.
    CommentClassified {
        /// Kind of the owning container.
        kind: ContainerKind,
        /// Comment node identifier.
        comment_id: String,
        /// Whether the comment was classified as spam.
        spam: bool,
    },
    /// The classifier failed and the comment was treated as not spam.
    ClassifierFailed {
        /// Kind of the owning container.
        kind: ContainerKind,
        /// Comment node identifier.
        comment_id: String,
        /// Error reported by the classifier.
        reason: String,
    },
    /// A spam comment was minimized, or the attempt did not hide it.
    CommentMinimized {
        /// Kind of the owning container.
        kind: ContainerKind,
        /// Comment node identifier.
        comment_id: String,
        /// Whether GitHub reports the comment as hidden.
        minimized: bool,
    },
    /// The resumption cursor moved past a fully processed page.
    CursorAdvanced {
        /// Container kind whose cursor moved.
        kind: ContainerKind,
        /// New cursor value.
        cursor: String,
    },
    /// Later comment pages of one container could not be fetched.
    ContainerIncomplete {
        /// Kind of the container.
        kind: ContainerKind,
        /// Container node identifier.
        container_id: String,
        /// Error that ended the container's comment pagination.
        reason: String,
    },
    /// Crawling a container kind stopped early.
    CrawlAborted {
        /// Container kind that stopped.
        kind: ContainerKind,
        /// Error that stopped the crawl.
        reason: String,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Sink that keeps events in memory for later inspection.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingTelemetrySink {
    events: std::sync::Mutex<Vec<TelemetryEvent>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingTelemetrySink {
    /// Drains the recorded events. Returns nothing if the lock was poisoned.
    #[must_use]
    pub fn take(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .map(|mut events| events.drain(..).collect())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl TelemetrySink for RecordingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordingTelemetrySink, TelemetryEvent, TelemetrySink};
    use crate::github::ContainerKind;

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingTelemetrySink::default();
        sink.record(TelemetryEvent::CursorAdvanced {
            kind: ContainerKind::Issue,
            cursor: "Y3Vyc29y".to_owned(),
        });

        assert_eq!(
            sink.take(),
            vec![TelemetryEvent::CursorAdvanced {
                kind: ContainerKind::Issue,
                cursor: "Y3Vyc29y".to_owned(),
            }]
        );
        assert!(sink.take().is_empty(), "take should drain");
    }

    #[test]
    fn events_serialise_with_snake_case_tag() {
        let event = TelemetryEvent::CommentMinimized {
            kind: ContainerKind::PullRequest,
            comment_id: "PRC_1".to_owned(),
            minimized: true,
        };

        let json = serde_json::to_value(&event).expect("event should serialise");

        assert_eq!(
            json,
            serde_json::json!({
                "type": "comment_minimized",
                "kind": "pull_request",
                "comment_id": "PRC_1",
                "minimized": true
            })
        );
    }
}
