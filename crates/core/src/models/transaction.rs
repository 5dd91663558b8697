use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ledger::{require_positive, require_text, Record};
use super::money::Money;
use crate::errors::CoreError;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "Income"),
            TransactionType::Expense => write!(f, "Expense"),
        }
    }
}

/// Filter used by the transaction list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl TransactionFilter {
    #[must_use]
    pub fn matches(&self, transaction_type: TransactionType) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Only(t) => *t == transaction_type,
        }
    }
}

/// Sort order for transaction listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionSortOrder {
    /// Newest date first
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
    /// Alphabetical by category
    CategoryAsc,
}

/// A single income or expense entry. `amount` is always positive; the
/// direction lives in `transaction_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub description: String,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub recurring: bool,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            category: category.into(),
            date,
            transaction_type,
            recurring: false,
        }
    }

    pub fn income(description: impl Into<String>, amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(description, amount, category, date, TransactionType::Income)
    }

    pub fn expense(description: impl Into<String>, amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(description, amount, category, date, TransactionType::Expense)
    }

    /// Mark this transaction as recurring.
    #[must_use]
    pub fn recurring(mut self) -> Self {
        self.recurring = true;
        self
    }

    #[must_use]
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Amount with the direction applied: income positive, expense negative.
    #[must_use]
    pub fn signed_amount(&self) -> Money {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

impl Record for Transaction {
    const KIND: &'static str = "Transaction";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<(), CoreError> {
        require_text("description", &self.description)?;
        require_text("category", &self.category)?;
        require_positive("amount", self.amount)
    }
}
