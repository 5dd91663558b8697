use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::money::{Money, MAX_ABS_UNITS};

/// Common surface of every stored record (transactions, budgets, goals, ...).
pub trait Record: Clone {
    /// Human-readable record kind, used in logs and errors.
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    /// Check the record's own fields before it enters a ledger.
    fn validate(&self) -> Result<(), CoreError>;
}

/// An ordered collection of records.
///
/// Order is insertion order. Every mutation builds a fresh `Vec` and swaps it
/// in, so references handed out before a mutation never observe a partially
/// applied change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger<T> {
    records: Vec<T>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<T: Record> Ledger<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from existing records, validating each one.
    pub fn from_records(records: Vec<T>) -> Result<Self, CoreError> {
        for record in &records {
            record.validate()?;
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Append a record. Returns its id.
    pub fn add(&mut self, record: T) -> Result<Uuid, CoreError> {
        record.validate()?;
        let id = record.id();
        if self.get(id).is_some() {
            return Err(CoreError::ValidationError(format!(
                "{} with id {id} already exists",
                T::KIND
            )));
        }

        let mut next = self.records.clone();
        next.push(record);
        self.records = next;

        debug!(kind = T::KIND, %id, "record added");
        Ok(id)
    }

    /// Replace the record with `id`, keeping its position and identifier.
    /// The replacement is validated before anything changes.
    pub fn update<F>(&mut self, id: Uuid, apply: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut T),
    {
        let idx = self.position(id)?;

        let mut updated = self.records[idx].clone();
        apply(&mut updated);
        if updated.id() != id {
            return Err(CoreError::ValidationError(format!(
                "{} id cannot change on update",
                T::KIND
            )));
        }
        updated.validate()?;

        let mut next = self.records.clone();
        next[idx] = updated;
        self.records = next;

        debug!(kind = T::KIND, %id, "record updated");
        Ok(())
    }

    /// Remove the record with `id` and return it.
    pub fn remove(&mut self, id: Uuid) -> Result<T, CoreError> {
        let idx = self.position(id)?;
        let removed = self.records[idx].clone();
        self.records = self
            .records
            .iter()
            .filter(|r| r.id() != id)
            .cloned()
            .collect();

        debug!(kind = T::KIND, %id, "record removed");
        Ok(removed)
    }

    fn position(&self, id: Uuid) -> Result<usize, CoreError> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| CoreError::RecordNotFound(format!("{} {id}", T::KIND)))
    }
}

impl<'a, T> IntoIterator for &'a Ledger<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ── Field checks shared by record validators ────────────────────────

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::ValidationError(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_within_limit(field: &str, value: Money) -> Result<(), CoreError> {
    if !value.is_within_limit() {
        return Err(CoreError::ValidationError(format!(
            "{field} exceeds the maximum of {MAX_ABS_UNITS} (got {value})"
        )));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: Money) -> Result<(), CoreError> {
    require_within_limit(field, value)?;
    if value.is_negative() {
        return Err(CoreError::ValidationError(format!(
            "{field} must not be negative (got {value})"
        )));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: Money) -> Result<(), CoreError> {
    require_within_limit(field, value)?;
    if value.is_negative() || value.is_zero() {
        return Err(CoreError::ValidationError(format!(
            "{field} must be positive (got {value})"
        )));
    }
    Ok(())
}
