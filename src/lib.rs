//! Spam sweeper library crate for moderating GitHub comments.
//!
//! The library pages through a repository's discussions, issues, and pull
//! requests over the GitHub GraphQL API, asks a spam classifier about every
//! visible comment, and minimizes the comments it flags. A resumption cursor
//! per container kind lets scheduled runs pick up where the previous run
//! stopped.

pub mod classifier;
pub mod config;
pub mod github;
pub mod moderation;
pub mod persistence;
pub mod telemetry;

pub use classifier::{HttpSpamClassifier, HttpSpamClassifierConfig, SpamClassifier, Verdict};
pub use config::SpamSweeperConfig;
pub use github::{
    CommentGateway, ContainerKind, ModerationError, OctocrabCommentGateway, PersonalAccessToken,
    RepositoryLocator,
};
pub use moderation::{
    CommentClassification, CommentOutcome, CommentResult, KindSummary, ModerationContext,
    ModerationOptions, ModerationReport, moderate,
};
pub use persistence::{CursorState, CursorStore, JsonFileCursorStore, PersistenceError};
pub use telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
