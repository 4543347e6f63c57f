//! Ingestion error taxonomy.

use crate::model::{EntityId, EntityKind, JournalId};
use crate::payload::PayloadError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type IngestResult<T> = Result<T, IngestError>;

/// Payload unit that is cleared and repopulated as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Top-level listing of sections, subjects, groups and journals.
    Menu,
    /// Detail of one journal.
    Journal(JournalId),
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Menu => write!(f, "menu"),
            Self::Journal(id) => write!(f, "journal {id}"),
        }
    }
}

/// Errors from scope ingestion and required lookups.
#[derive(Debug)]
pub enum IngestError {
    /// Required field missing or invalid; nothing was applied.
    MalformedPayload { scope: Scope, source: PayloadError },
    /// A record points at an identifier with no resolvable entity; nothing
    /// was applied.
    DanglingReference {
        scope: Scope,
        kind: EntityKind,
        id: EntityId,
    },
    /// A required single result was requested and nothing matched.
    NotFound {
        kind: EntityKind,
        id: Option<EntityId>,
    },
}

impl IngestError {
    pub(crate) fn malformed(scope: Scope, source: PayloadError) -> Self {
        Self::MalformedPayload { scope, source }
    }

    pub(crate) fn dangling(scope: Scope, kind: EntityKind, id: EntityId) -> Self {
        Self::DanglingReference { scope, kind, id }
    }

    /// Attaches `scope` to a repository lookup failure.
    pub(crate) fn from_repo(scope: Scope, err: RepoError) -> Self {
        match err {
            RepoError::DanglingReference { kind, id } => Self::dangling(scope, kind, id),
            RepoError::NotFound { kind } => Self::NotFound { kind, id: None },
        }
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedPayload { .. } => "malformed_payload",
            Self::DanglingReference { .. } => "dangling_reference",
            Self::NotFound { .. } => "not_found",
        }
    }

    /// Scope the failure belongs to, when it arose during ingestion.
    pub fn scope(&self) -> Option<Scope> {
        match self {
            Self::MalformedPayload { scope, .. } | Self::DanglingReference { scope, .. } => {
                Some(*scope)
            }
            Self::NotFound { .. } => None,
        }
    }
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedPayload { scope, source } => {
                write!(f, "malformed payload in {scope}: {source}")
            }
            Self::DanglingReference { scope, kind, id } => {
                write!(f, "dangling reference in {scope}: {kind} {id} does not exist")
            }
            Self::NotFound { kind, id: Some(id) } => write!(f, "{kind} not found: {id}"),
            Self::NotFound { kind, id: None } => write!(f, "no {kind} matched the lookup"),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedPayload { source, .. } => Some(source),
            Self::DanglingReference { .. } => None,
            Self::NotFound { .. } => None,
        }
    }
}
