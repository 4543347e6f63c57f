//! Payload source boundary.
//!
//! # Responsibility
//! - Define the replaceable collaborator that hands decoded payload trees to
//!   the core (network clients, fixtures, file dumps).
//! - Provide a directory-backed implementation for offline use.
//!
//! # Invariants
//! - Sources perform all I/O before the core sees a payload; the core never
//!   calls back into a source mid-ingestion.

use crate::model::JournalId;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub type SourceResult<T> = Result<T, SourceError>;

/// Failures while retrieving or decoding a payload tree.
#[derive(Debug)]
pub enum SourceError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read payload `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "payload `{}` is not valid JSON: {source}", path.display())
            }
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Supplier of raw payload trees.
pub trait PayloadSource {
    /// Top-level listing of sections, subjects and journal stubs.
    fn fetch_menu(&self) -> SourceResult<Value>;
    /// Detail payload of one journal.
    fn fetch_journal(&self, journal_id: JournalId) -> SourceResult<Value>;
}

/// Reads `<root>/menu.json` and `<root>/journals/<journal_id>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryPayloadSource {
    root: PathBuf,
}

impl DirectoryPayloadSource {
    pub const MENU_FILE: &'static str = "menu.json";
    pub const JOURNALS_DIR: &'static str = "journals";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn menu_path(&self) -> PathBuf {
        self.root.join(Self::MENU_FILE)
    }

    pub fn journal_path(&self, journal_id: JournalId) -> PathBuf {
        self.root
            .join(Self::JOURNALS_DIR)
            .join(format!("{journal_id}.json"))
    }
}

impl PayloadSource for DirectoryPayloadSource {
    fn fetch_menu(&self) -> SourceResult<Value> {
        read_json(self.menu_path())
    }

    fn fetch_journal(&self, journal_id: JournalId) -> SourceResult<Value> {
        read_json(self.journal_path(journal_id))
    }
}

fn read_json(path: PathBuf) -> SourceResult<Value> {
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(source) => return Err(SourceError::Io { path, source }),
    };
    serde_json::from_str(&raw).map_err(|source| SourceError::Json { path, source })
}
