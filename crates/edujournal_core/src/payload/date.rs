//! Fixed-format calendar date parsing.

use crate::payload::{PayloadError, PayloadResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// chrono accepts unpadded fields; upstream always zero-pads.
static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> PayloadResult<NaiveDate> {
    if !ISO_DATE_RE.is_match(value) {
        return Err(PayloadError::InvalidDate {
            value: value.to_string(),
        });
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).map_err(|_| PayloadError::InvalidDate {
        value: value.to_string(),
    })
}

/// `deserialize_with` adapter for date fields.
pub(crate) fn deserialize_iso_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso_date(&raw).map_err(serde::de::Error::custom)
}
