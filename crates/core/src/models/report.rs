use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Span a report covers, anchored on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// The Monday-to-Sunday week containing the anchor date
    Weekly,
    /// The calendar month containing the anchor date
    Monthly,
    /// The calendar year containing the anchor date
    #[default]
    Yearly,
}

impl ReportPeriod {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            ReportPeriod::Weekly => "Weekly Report",
            ReportPeriod::Monthly => "Monthly Report",
            ReportPeriod::Yearly => "Yearly Report",
        }
    }
}

/// Income and expenses for one bucket of the trend series
/// (a weekday, a week of the month, or a month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub income: Money,
    pub expenses: Money,
}

impl TrendPoint {
    #[must_use]
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// Total expenses in one category and its share of all expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Money,
    /// 0..=100
    pub percentage: f64,
}

/// Running net savings at the end of each trend bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub label: String,
    pub savings: Money,
}

/// Income/expense report for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub period: ReportPeriod,
    pub title: String,
    /// First day covered (inclusive)
    pub from: NaiveDate,
    /// Last day covered (inclusive)
    pub to: NaiveDate,
    pub total_income: Money,
    pub total_expenses: Money,
    /// total_income - total_expenses, may be negative
    pub net_savings: Money,
    /// net_savings / total_income × 100, 0 when there is no income
    pub savings_rate: f64,
    pub trend: Vec<TrendPoint>,
    /// Largest category first
    pub category_breakdown: Vec<CategoryShare>,
    pub cumulative_savings: Vec<CumulativePoint>,
}
