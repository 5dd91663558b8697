//! Derived figures over record collections.
//!
//! Everything here is a pure function: no stored state, no clock reads.
//! Callers pass `today` explicitly so results are reproducible.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::budget::{Budget, BudgetStatus};
use crate::models::debt::Debt;
use crate::models::money::Money;
use crate::models::savings_goal::SavingsGoal;
use crate::models::subscription::{Frequency, Subscription};
use crate::models::transaction::Transaction;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Percentage at which a budget turns to warning.
pub const BUDGET_WARNING_PCT: f64 = 80.0;
/// Percentage at which a budget turns to danger.
pub const BUDGET_DANGER_PCT: f64 = 90.0;

// ── Dates ───────────────────────────────────────────────────────────

/// Parse a `YYYY-MM-DD` date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidDate(s.to_string()))
}

/// Whole calendar days from `today` to `target`.
/// Positive = future, 0 = today, negative = past.
#[must_use]
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// Like [`days_until`], but from a point in time. The time of day is dropped
/// first, so any two instants on the same day give the same answer.
#[must_use]
pub fn days_until_at(target: NaiveDate, now: NaiveDateTime) -> i64 {
    days_until(target, now.date())
}

/// [`days_until`] for an ISO date string.
pub fn days_until_str(target: &str, today: NaiveDate) -> Result<i64, CoreError> {
    Ok(days_until(parse_iso_date(target)?, today))
}

/// Where a due date sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DueStatus {
    /// Past the due date by this many days (always > 0)
    Overdue(i64),
    /// Due within the window; days remaining (0 = today)
    DueSoon(i64),
    /// Further out than the window
    Scheduled(i64),
}

#[must_use]
pub fn due_status(due: NaiveDate, today: NaiveDate, window_days: i64) -> DueStatus {
    let days = days_until(due, today);
    if days < 0 {
        DueStatus::Overdue(-days)
    } else if days <= window_days {
        DueStatus::DueSoon(days)
    } else {
        DueStatus::Scheduled(days)
    }
}

// ── Percentages ─────────────────────────────────────────────────────

/// `numerator × 100 / denominator`, or `None` if it leaves the `Decimal` range.
fn checked_percent(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    numerator
        .checked_mul(HUNDRED)
        .and_then(|n| n.checked_div(denominator))
}

/// `current / target × 100`, clamped to `[0, 100]`.
/// A zero (or negative) target yields 0 rather than NaN/∞. A ratio too
/// large to represent clamps like any other out-of-range value.
#[must_use]
pub fn percentage_of(current: Money, target: Money) -> f64 {
    if target.amount() <= Decimal::ZERO {
        return 0.0;
    }
    match checked_percent(current.amount(), target.amount()) {
        Some(pct) => pct.clamp(Decimal::ZERO, HUNDRED).to_f64().unwrap_or(0.0),
        None if current.is_negative() => 0.0,
        None => 100.0,
    }
}

/// `net / income × 100`, unclamped (may be negative). 0 with no income.
#[must_use]
pub fn savings_rate(net: Money, income: Money) -> f64 {
    if income.amount() <= Decimal::ZERO {
        return 0.0;
    }
    match checked_percent(net.amount(), income.amount()) {
        Some(rate) => rate.to_f64().unwrap_or(0.0),
        None => net.to_f64() / income.to_f64() * 100.0,
    }
}

// ── Budgets ─────────────────────────────────────────────────────────

#[must_use]
pub fn budget_percentage(budget: &Budget) -> f64 {
    percentage_of(budget.spent, budget.limit)
}

/// `limit - spent`; negative when overspent.
#[must_use]
pub fn budget_remaining(budget: &Budget) -> Money {
    budget.limit - budget.spent
}

/// Whether `spent / limit >= alert_ratio`, evaluated on the budget as it is
/// now. Compared as `spent >= limit × ratio` so no division happens.
///
/// A zero limit alerts as soon as anything is spent. It is not treated as a
/// limit of 1, which would stay quiet until `spent` reached the ratio itself
/// (0.80 at the default).
#[must_use]
pub fn is_budget_alert(budget: &Budget, alert_ratio: Decimal) -> bool {
    if budget.limit.is_zero() {
        return !budget.spent.is_zero();
    }
    match budget.limit.amount().checked_mul(alert_ratio) {
        Some(threshold) => budget.spent.amount() >= threshold,
        // Threshold beyond the representable range; no spend can reach it
        None => false,
    }
}

#[must_use]
pub fn budget_status(percentage: f64) -> BudgetStatus {
    if percentage >= BUDGET_DANGER_PCT {
        BudgetStatus::Danger
    } else if percentage >= BUDGET_WARNING_PCT {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Normal
    }
}

#[must_use]
pub fn budget_alert_count(budgets: &[Budget], alert_ratio: Decimal) -> usize {
    budgets
        .iter()
        .filter(|b| is_budget_alert(b, alert_ratio))
        .count()
}

// ── Savings goals ───────────────────────────────────────────────────

#[must_use]
pub fn goal_percentage(goal: &SavingsGoal) -> f64 {
    percentage_of(goal.current_amount, goal.target_amount)
}

/// `target - current`; negative once the goal is exceeded.
#[must_use]
pub fn goal_remaining(goal: &SavingsGoal) -> Money {
    goal.target_amount - goal.current_amount
}

#[must_use]
pub fn is_goal_complete(goal: &SavingsGoal) -> bool {
    goal.current_amount >= goal.target_amount
}

/// Overall progress across all goals: Σcurrent / Σtarget × 100.
#[must_use]
pub fn overall_savings_percentage(goals: &[SavingsGoal]) -> f64 {
    let target = sum_by(goals, |_| true, |g| g.target_amount);
    let current = sum_by(goals, |_| true, |g| g.current_amount);
    percentage_of(current, target)
}

// ── Totals ──────────────────────────────────────────────────────────

/// Exact sum of `amount(r)` over the records matching `predicate`.
pub fn sum_by<T, P, A>(records: &[T], predicate: P, amount: A) -> Money
where
    P: Fn(&T) -> bool,
    A: Fn(&T) -> Money,
{
    records.iter().filter(|&r| predicate(r)).map(amount).sum()
}

#[must_use]
pub fn total_income(transactions: &[Transaction]) -> Money {
    sum_by(transactions, Transaction::is_income, |t| t.amount)
}

#[must_use]
pub fn total_expenses(transactions: &[Transaction]) -> Money {
    sum_by(transactions, Transaction::is_expense, |t| t.amount)
}

/// Income minus expenses.
#[must_use]
pub fn net_balance(transactions: &[Transaction]) -> Money {
    transactions.iter().map(Transaction::signed_amount).sum()
}

#[must_use]
pub fn total_active_debt(debts: &[Debt]) -> Money {
    sum_by(debts, Debt::is_active, |d| d.amount)
}

#[must_use]
pub fn total_budget_limit(budgets: &[Budget]) -> Money {
    sum_by(budgets, |_| true, |b| b.limit)
}

#[must_use]
pub fn total_budget_spent(budgets: &[Budget]) -> Money {
    sum_by(budgets, |_| true, |b| b.spent)
}

/// Monthly cost of active subscriptions: Σmonthly + Σyearly / 12.
/// Not rounded; round at display.
#[must_use]
pub fn monthly_equivalent_cost(subscriptions: &[Subscription]) -> Money {
    let monthly = sum_by(
        subscriptions,
        |s| s.is_active() && s.frequency == Frequency::Monthly,
        |s| s.cost,
    );
    let yearly = sum_by(
        subscriptions,
        |s| s.is_active() && s.frequency == Frequency::Yearly,
        |s| s.cost,
    );
    monthly + Money::new(yearly.amount() / Decimal::from(12))
}

// ── Upcoming window ─────────────────────────────────────────────────

/// Something with a date it falls due on and an active/inactive state.
pub trait Scheduled {
    fn due_on(&self) -> NaiveDate;
    fn is_pending(&self) -> bool;
}

impl Scheduled for Debt {
    fn due_on(&self) -> NaiveDate {
        self.due_date
    }

    fn is_pending(&self) -> bool {
        self.is_active()
    }
}

impl Scheduled for Subscription {
    fn due_on(&self) -> NaiveDate {
        self.renewal_date
    }

    fn is_pending(&self) -> bool {
        self.is_active()
    }
}

/// Pending records with `days_until(due) <= window_days`, in input order.
/// Overdue records (negative days) are included.
pub fn upcoming_within<T: Scheduled>(records: &[T], today: NaiveDate, window_days: i64) -> Vec<&T> {
    records
        .iter()
        .filter(|r| r.is_pending() && days_until(r.due_on(), today) <= window_days)
        .collect()
}
