//! Source-driven refresh use-cases.
//!
//! # Responsibility
//! - Pull payloads from a `PayloadSource` and hand them to `SchoolGraph`.
//!
//! # Invariants
//! - A source failure leaves the graph untouched for that scope.
//! - `refresh_all` ingests the menu before any journal detail.

use crate::model::{Entity, Journal, JournalId, Shared};
use crate::service::error::IngestError;
use crate::service::school_graph::{MenuSummary, SchoolGraph};
use crate::source::{PayloadSource, SourceError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from source-driven refreshes.
#[derive(Debug)]
pub enum SyncError {
    Source(SourceError),
    Ingest(IngestError),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::Ingest(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::Ingest(err) => Some(err),
        }
    }
}

impl From<SourceError> for SyncError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<IngestError> for SyncError {
    fn from(value: IngestError) -> Self {
        Self::Ingest(value)
    }
}

/// Outcome of a full refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    pub menu: MenuSummary,
    pub journals_refreshed: usize,
}

/// Keeps one `SchoolGraph` current from a payload source.
pub struct SyncService<S: PayloadSource> {
    source: S,
    graph: SchoolGraph,
}

impl<S: PayloadSource> SyncService<S> {
    /// Creates a service with an empty graph.
    pub fn new(source: S) -> Self {
        Self::with_graph(source, SchoolGraph::new())
    }

    pub fn with_graph(source: S, graph: SchoolGraph) -> Self {
        Self { source, graph }
    }

    pub fn graph(&self) -> &SchoolGraph {
        &self.graph
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_graph(self) -> SchoolGraph {
        self.graph
    }

    /// Fetches and ingests the top-level listing.
    pub fn refresh_menu(&mut self) -> Result<MenuSummary, SyncError> {
        let payload = self.source.fetch_menu()?;
        Ok(self.graph.ingest_menu(&payload)?)
    }

    /// Fetches and ingests the detail of one listed journal.
    pub fn refresh_journal(&mut self, journal_id: JournalId) -> Result<Shared<Journal>, SyncError> {
        self.graph.journal(journal_id)?;
        let payload = self.source.fetch_journal(journal_id)?;
        Ok(self.graph.ingest_journal(journal_id, &payload)?)
    }

    /// Refreshes the listing, then every journal it lists, in listing order.
    ///
    /// Stops at the first failing journal; journals refreshed before it keep
    /// their new state.
    pub fn refresh_all(&mut self) -> Result<RefreshReport, SyncError> {
        let menu = self.refresh_menu()?;
        let journal_ids: Vec<JournalId> = self
            .graph
            .journals()
            .iter()
            .map(|journal| journal.borrow().id())
            .collect();

        for journal_id in &journal_ids {
            self.refresh_journal(*journal_id)?;
        }

        info!(
            "event=refresh_all module=service status=ok journals={}",
            journal_ids.len()
        );
        Ok(RefreshReport {
            menu,
            journals_refreshed: journal_ids.len(),
        })
    }
}
