//! Top-level listing: sections → subjects → journal stubs.

use crate::model::{GroupId, JournalId, SectionId, SubjectId};
use crate::payload::{decode, PayloadResult};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuSection {
    pub id: SectionId,
    pub name: String,
    pub items: Vec<MenuSubject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuSubject {
    pub id: SubjectId,
    pub name: String,
    pub items: Vec<MenuJournal>,
}

/// Journal stub; `name` labels the group the journal belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuJournal {
    pub id: JournalId,
    pub grade_id: GroupId,
    pub name: String,
}

/// Decodes the whole listing; any malformed record rejects the listing.
pub fn decode_menu(value: &Value) -> PayloadResult<Vec<MenuSection>> {
    decode("menu", value)
}
