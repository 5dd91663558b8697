use serde::{Deserialize, Serialize};

use super::debt::Debt;
use super::money::Money;
use super::subscription::Subscription;

/// Headline figures for the dashboard, as of one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub as_of_date: chrono::NaiveDate,

    /// Sum of all income transactions
    pub total_income: Money,

    /// Sum of all expense transactions
    pub total_expenses: Money,

    /// total_income - total_expenses
    pub net_balance: Money,

    /// Sum of all budget limits
    pub total_budget: Money,

    /// Sum of all budget spend
    pub total_spent: Money,

    /// Budgets currently at or past the alert threshold
    pub budget_alert_count: usize,

    /// Sum of current amounts across savings goals
    pub total_saved: Money,

    /// Sum of target amounts across savings goals
    pub total_savings_target: Money,

    /// total_saved / total_savings_target × 100, 0 with no target
    pub savings_progress_pct: f64,

    /// Sum of active debts
    pub total_active_debt: Money,

    /// Active debts due within the upcoming window (overdue included)
    pub upcoming_debts: Vec<Debt>,

    /// Active subscriptions renewing within the upcoming window
    pub upcoming_renewals: Vec<Subscription>,

    /// Monthly cost of active subscriptions (yearly ones spread over 12 months)
    pub monthly_subscription_cost: Money,
}
