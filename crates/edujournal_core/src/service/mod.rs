//! Ingestion use-cases.
//!
//! # Responsibility
//! - Apply payload scopes to the identity-mapped graph.
//! - Drive refreshes from a payload source.

pub mod error;
pub mod school_graph;
pub mod sync_service;

pub use error::{IngestError, IngestResult, Scope};
pub use school_graph::{MenuSummary, SchoolGraph};
pub use sync_service::{RefreshReport, SyncError, SyncService};
