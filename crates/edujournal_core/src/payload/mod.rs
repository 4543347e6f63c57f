//! Decoding of upstream payload trees into typed records.
//!
//! # Responsibility
//! - Turn an already decoded JSON tree into typed field values.
//! - Reject missing or mistyped required fields before any entity is touched.
//!
//! # Invariants
//! - Decoding is pure: it never reads or writes identity caches.
//! - Unknown upstream keys are ignored.

use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod date;
pub mod journal;
pub mod menu;

pub use date::parse_iso_date;
pub use journal::{
    decode_journal_detail, ControlRecord, ControlTypeRecord, JournalDetail, JournalHeader,
    LessonRecord, MarkRecord, MarkTypeRecord, MarkTypeSectionRecord, NamedRecord, PeriodRecord,
};
pub use menu::{decode_menu, MenuJournal, MenuSection, MenuSubject};

pub type PayloadResult<T> = Result<T, PayloadError>;

/// Payload shape errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Required field missing or of the wrong type.
    Malformed {
        context: &'static str,
        message: String,
    },
    /// Date string not in `YYYY-MM-DD` form or not a calendar date.
    InvalidDate { value: String },
}

impl Display for PayloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed { context, message } => {
                write!(f, "malformed {context} payload: {message}")
            }
            Self::InvalidDate { value } => {
                write!(f, "invalid date `{value}`, expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for PayloadError {}

/// Deserializes `value` as `T`, labelling failures with `context`.
pub(crate) fn decode<'de, T>(context: &'static str, value: &'de Value) -> PayloadResult<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(value).map_err(|err| PayloadError::Malformed {
        context,
        message: err.to_string(),
    })
}
