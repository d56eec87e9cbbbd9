//! Operator settings and their persistence boundary.
//!
//! # Responsibility
//! - Define operator defaults (facilitator, location, recipient, headcount).
//! - Validate settings before they are stored.
//! - Abstract storage behind `SettingsStore`.
//!
//! # Invariants
//! - `default_attendee_count` goes through the shared headcount clamp.
//! - `company_email` is a syntactically valid address when saved.
//! - Loading with nothing stored yields `AppSettings::default()`.

pub mod store;

use crate::db::DbError;
use crate::model::meeting::{clamp_expected_count, DEFAULT_EXPECTED_COUNT};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recipient used until the operator configures one.
pub const DEFAULT_COMPANY_EMAIL: &str = "safety@company.com";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

/// Settings validation and persistence errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid company email: `{0}`")]
    InvalidEmail(String),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("failed to encode setting `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid persisted settings: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for SettingsError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Operator preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub default_facilitator: String,
    pub default_location: String,
    /// Mail recipient for emailed reports.
    pub company_email: String,
    pub auto_save_enabled: bool,
    pub tablet_mode_enabled: bool,
    pub default_attendee_count: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_facilitator: String::new(),
            default_location: String::new(),
            company_email: DEFAULT_COMPANY_EMAIL.to_string(),
            auto_save_enabled: true,
            tablet_mode_enabled: false,
            default_attendee_count: DEFAULT_EXPECTED_COUNT,
        }
    }
}

impl AppSettings {
    /// Returns a copy with trimmed text and a clamped headcount.
    pub fn normalized(&self) -> Self {
        Self {
            default_facilitator: self.default_facilitator.trim().to_string(),
            default_location: self.default_location.trim().to_string(),
            company_email: self.company_email.trim().to_string(),
            auto_save_enabled: self.auto_save_enabled,
            tablet_mode_enabled: self.tablet_mode_enabled,
            default_attendee_count: clamp_expected_count(i64::from(self.default_attendee_count)),
        }
    }

    /// Checks fields that cannot be repaired by normalization.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !EMAIL_RE.is_match(self.company_email.trim()) {
            return Err(SettingsError::InvalidEmail(self.company_email.clone()));
        }
        Ok(())
    }

    /// Recipients for emailed reports.
    pub fn mail_recipients(&self) -> Vec<String> {
        vec![self.company_email.trim().to_string()]
    }
}

/// Storage contract for operator settings.
pub trait SettingsStore {
    /// Loads stored settings, falling back to defaults per missing field.
    fn load(&self) -> Result<AppSettings, SettingsError>;
    /// Validates, normalizes and stores settings; returns what was stored.
    fn save(&self, settings: &AppSettings) -> Result<AppSettings, SettingsError>;
    /// Removes stored settings and returns the defaults.
    fn reset(&self) -> Result<AppSettings, SettingsError>;
}
