use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ledger::{require_non_negative, require_text, Record};
use super::money::Money;
use crate::errors::CoreError;

/// A target amount to save by a deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub deadline: NaiveDate,
    /// Optional decoration shown next to the goal name.
    #[serde(default)]
    pub emoji: Option<String>,
}

impl SavingsGoal {
    pub fn new(name: impl Into<String>, target_amount: Money, current_amount: Money, deadline: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount,
            current_amount,
            deadline,
            emoji: None,
        }
    }

    #[must_use]
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }
}

impl Record for SavingsGoal {
    const KIND: &'static str = "SavingsGoal";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        require_non_negative("target amount", self.target_amount)?;
        require_non_negative("current amount", self.current_amount)
    }
}
