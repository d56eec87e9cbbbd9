//! Meeting metadata model.
//!
//! # Responsibility
//! - Hold the date, location, facilitator, topic and expected headcount.
//! - Enforce the expected headcount range in exactly one place.
//!
//! # Invariants
//! - `expected_count` is always within `[MIN_EXPECTED_COUNT, MAX_EXPECTED_COUNT]`.
//! - `date` is stored verbatim as typed (`YYYY-MM-DD` by convention).

use crate::settings::AppSettings;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Smallest roster the operator may generate.
pub const MIN_EXPECTED_COUNT: u32 = 1;
/// Largest roster the operator may generate.
pub const MAX_EXPECTED_COUNT: u32 = 50;
/// Headcount used when input is missing or unparsable.
pub const DEFAULT_EXPECTED_COUNT: u32 = 10;

/// Number of free-text metadata fields that must be filled for completion.
pub const REQUIRED_METADATA_FIELDS: usize = 3;

static LEADING_INT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid leading integer regex"));

/// Clamps any headcount into the supported roster range.
pub fn clamp_expected_count(value: i64) -> u32 {
    let clamped = value.clamp(i64::from(MIN_EXPECTED_COUNT), i64::from(MAX_EXPECTED_COUNT));
    // In range by construction.
    clamped as u32
}

/// Parses typed headcount input, then clamps it.
///
/// Leading digits are honored (`"12 people"` -> 12). Input without a leading
/// integer, or a zero value, falls back to `DEFAULT_EXPECTED_COUNT`.
pub fn parse_expected_count(text: &str) -> u32 {
    let parsed = LEADING_INT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|value| value.as_str().parse::<i64>().ok())
        .unwrap_or(0);

    if parsed == 0 {
        return DEFAULT_EXPECTED_COUNT;
    }
    clamp_expected_count(parsed)
}

/// Editable text field of the meeting header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingField {
    Date,
    Location,
    Facilitator,
    Topic,
}

impl MeetingField {
    /// Parses the snake_case wire name used by the UI shell.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "date" => Some(Self::Date),
            "location" => Some(Self::Location),
            "facilitator" => Some(Self::Facilitator),
            "topic" => Some(Self::Topic),
            _ => None,
        }
    }
}

/// Header data for one safety meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingInfo {
    pub date: String,
    pub location: String,
    pub facilitator: String,
    pub topic: String,
    pub expected_count: u32,
}

impl MeetingInfo {
    /// Creates empty metadata for the given meeting date.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            location: String::new(),
            facilitator: String::new(),
            topic: String::new(),
            expected_count: DEFAULT_EXPECTED_COUNT,
        }
    }

    /// Creates metadata for `date` seeded from stored operator defaults.
    pub fn from_settings(settings: &AppSettings, date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            location: settings.default_location.clone(),
            facilitator: settings.default_facilitator.clone(),
            topic: String::new(),
            expected_count: clamp_expected_count(i64::from(settings.default_attendee_count)),
        }
    }

    /// Formats a calendar date the way the meeting form stores it.
    pub fn date_string(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Replaces one text field.
    pub fn set_field(&mut self, field: MeetingField, value: impl Into<String>) {
        let value = value.into();
        match field {
            MeetingField::Date => self.date = value,
            MeetingField::Location => self.location = value,
            MeetingField::Facilitator => self.facilitator = value,
            MeetingField::Topic => self.topic = value,
        }
    }

    /// Sets the expected headcount through the shared clamp.
    pub fn set_expected_count(&mut self, value: i64) -> u32 {
        self.expected_count = clamp_expected_count(value);
        self.expected_count
    }

    /// Counts non-empty fields among location, facilitator and topic.
    ///
    /// Whitespace is kept as typed and counts as filled.
    pub fn filled_field_count(&self) -> usize {
        [&self.location, &self.facilitator, &self.topic]
            .into_iter()
            .filter(|value| !value.is_empty())
            .count()
    }

    /// Returns the meeting date parsed as a calendar date, if well-formed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }
}
