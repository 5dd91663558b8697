use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::debt::Debt;
use super::ledger::{Ledger, Record};
use super::savings_goal::SavingsGoal;
use super::settings::Settings;
use super::subscription::Subscription;
use super::transaction::Transaction;
use crate::errors::CoreError;

/// The main data container: every record collection plus user settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub transactions: Ledger<Transaction>,

    #[serde(default)]
    pub budgets: Ledger<Budget>,

    #[serde(default)]
    pub savings_goals: Ledger<SavingsGoal>,

    #[serde(default)]
    pub debts: Ledger<Debt>,

    #[serde(default)]
    pub subscriptions: Ledger<Subscription>,

    #[serde(default)]
    pub settings: Settings,
}

impl Book {
    /// Check every record and the settings. Deserialization skips record
    /// validation, so snapshots from outside are run through this.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.settings.validate()?;
        validate_all(&self.transactions)?;
        validate_all(&self.budgets)?;
        validate_all(&self.savings_goals)?;
        validate_all(&self.debts)?;
        validate_all(&self.subscriptions)
    }
}

fn validate_all<T: Record>(ledger: &Ledger<T>) -> Result<(), CoreError> {
    let mut seen = std::collections::HashSet::new();
    for record in ledger {
        record.validate()?;
        if !seen.insert(record.id()) {
            return Err(CoreError::ValidationError(format!(
                "duplicate {} id {}",
                T::KIND,
                record.id()
            )));
        }
    }
    Ok(())
}
