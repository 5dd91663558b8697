use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::currency::Currency;
use crate::errors::CoreError;

/// Days ahead (inclusive) in which a due date or renewal counts as upcoming.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 7;

/// User-configurable settings. Missing fields in a settings file fall back
/// to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display currency used when no selection has been persisted yet.
    /// Read by `CurrencySession::load_with_settings`.
    pub default_currency: Currency,

    /// A budget alerts once `spent / limit` reaches this ratio (0.8 = 80%).
    pub budget_alert_ratio: Decimal,

    /// Window for "upcoming" debts and subscription renewals.
    pub upcoming_window_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: Currency::default(),
            budget_alert_ratio: Decimal::new(8, 1),
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    /// Load settings from a JSON file. A missing file yields the defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Reject values that would make the derived metrics meaningless.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.budget_alert_ratio <= Decimal::ZERO {
            return Err(CoreError::ValidationError(format!(
                "budget alert ratio must be positive (got {})",
                self.budget_alert_ratio
            )));
        }
        if self.upcoming_window_days < 0 {
            return Err(CoreError::ValidationError(format!(
                "upcoming window must not be negative (got {} days)",
                self.upcoming_window_days
            )));
        }
        Ok(())
    }
}
