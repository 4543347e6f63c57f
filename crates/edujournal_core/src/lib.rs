//! Core domain logic for EduJournal.
//!
//! Ingests hierarchical school payloads (sections, subjects, groups,
//! journals and their per-journal detail) into an identity-mapped,
//! cross-referenced in-memory graph.

pub mod logging;
pub mod model;
pub mod payload;
pub mod repo;
pub mod service;
pub mod source;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::{
    Control, ControlType, Entity, EntityId, EntityKind, Group, Journal, JournalId, Lesson,
    LessonType, Mark, MarkScale, MarkType, MarkTypeRef, MarkTypeSection, Period, Section, Shared,
    Student, Subject,
};
pub use payload::{PayloadError, PayloadResult};
pub use repo::{Container, IdentityCache, Registry, RegistryCounts, RepoError, RepoResult};
pub use service::{
    IngestError, IngestResult, MenuSummary, RefreshReport, SchoolGraph, Scope, SyncError,
    SyncService,
};
pub use source::{DirectoryPayloadSource, PayloadSource, SourceError, SourceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
