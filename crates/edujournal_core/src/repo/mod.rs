//! In-memory identity map and relationship bookkeeping.
//!
//! # Responsibility
//! - Provide keyed containers and per-kind identity caches.
//! - Keep parent/child memberships consistent across relinks.
//!
//! # Invariants
//! - Lookups that may legitimately miss return `Option`; the `require`
//!   variants turn a miss into a semantic `RepoError`.

use crate::model::entity::{EntityId, EntityKind};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod container;
pub mod identity_cache;
pub mod links;
pub mod registry;

pub use container::Container;
pub use identity_cache::IdentityCache;
pub use links::ParentRef;
pub use registry::{Registry, RegistryCounts};

pub type RepoResult<T> = Result<T, RepoError>;

/// Lookup failures of containers and identity caches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// A required container lookup matched no member.
    NotFound { kind: EntityKind },
    /// An identifier has no cached entity of the expected kind.
    DanglingReference { kind: EntityKind, id: EntityId },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind } => write!(f, "no {kind} matched the lookup"),
            Self::DanglingReference { kind, id } => {
                write!(f, "dangling reference to {kind} {id}")
            }
        }
    }
}

impl Error for RepoError {}
