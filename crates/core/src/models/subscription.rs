use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ledger::{require_non_negative, require_text, Record};
use super::money::Money;
use crate::errors::CoreError;

/// Billing cycle of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Cancelled,
}

impl SubscriptionStatus {
    /// Active ↔ Cancelled.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SubscriptionStatus::Active => SubscriptionStatus::Cancelled,
            SubscriptionStatus::Cancelled => SubscriptionStatus::Active,
        }
    }
}

/// A recurring paid service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// Cost per billing cycle.
    pub cost: Money,
    pub renewal_date: NaiveDate,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub category: String,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        cost: Money,
        renewal_date: NaiveDate,
        frequency: Frequency,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            cost,
            renewal_date,
            frequency,
            status: SubscriptionStatus::Active,
            category: category.into(),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

impl Record for Subscription {
    const KIND: &'static str = "Subscription";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        require_non_negative("cost", self.cost)
    }
}
