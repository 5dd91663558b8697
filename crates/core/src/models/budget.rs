use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ledger::{require_non_negative, require_text, Record};
use super::money::Money;
use crate::errors::CoreError;

/// How often a budget limit resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetPeriod::Weekly => write!(f, "Weekly"),
            BudgetPeriod::Monthly => write!(f, "Monthly"),
            BudgetPeriod::Yearly => write!(f, "Yearly"),
        }
    }
}

/// Visual severity of a budget's spend, from its percentage used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    /// Below 80%
    Normal,
    /// 80% up to (not including) 90%
    Warning,
    /// 90% and above
    Danger,
}

/// A spending limit for one category over a period.
///
/// There is no stored alert flag: whether a budget is over its alert
/// threshold is always derived from the current `spent` and `limit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub category: String,
    pub limit: Money,
    pub spent: Money,
    #[serde(default)]
    pub period: BudgetPeriod,
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: Money, spent: Money, period: BudgetPeriod) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            limit,
            spent,
            period,
        }
    }
}

impl Record for Budget {
    const KIND: &'static str = "Budget";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), CoreError> {
        require_text("category", &self.category)?;
        require_non_negative("limit", self.limit)?;
        require_non_negative("spent", self.spent)
    }
}
