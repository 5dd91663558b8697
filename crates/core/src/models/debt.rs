use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ledger::{require_non_negative, require_text, Record};
use super::money::Money;
use crate::errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    #[default]
    Active,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtCategory {
    #[default]
    Loan,
    CreditCard,
    Borrowed,
}

impl std::fmt::Display for DebtCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DebtCategory::Loan => write!(f, "Loan"),
            DebtCategory::CreditCard => write!(f, "Credit Card"),
            DebtCategory::Borrowed => write!(f, "Borrowed"),
        }
    }
}

/// Money owed to a creditor, due on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub creditor: String,
    pub amount: Money,
    /// Annual interest rate in percent (4.5 means 4.5%).
    pub interest_rate: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: DebtStatus,
    #[serde(default)]
    pub category: DebtCategory,
}

impl Debt {
    pub fn new(
        creditor: impl Into<String>,
        amount: Money,
        interest_rate: Decimal,
        due_date: NaiveDate,
        category: DebtCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            creditor: creditor.into(),
            amount,
            interest_rate,
            due_date,
            status: DebtStatus::Active,
            category,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == DebtStatus::Active
    }
}

impl Record for Debt {
    const KIND: &'static str = "Debt";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), CoreError> {
        require_text("creditor", &self.creditor)?;
        require_non_negative("amount", self.amount)?;
        if self.interest_rate.is_sign_negative() && !self.interest_rate.is_zero() {
            return Err(CoreError::ValidationError(format!(
                "interest rate must not be negative (got {})",
                self.interest_rate
            )));
        }
        Ok(())
    }
}
