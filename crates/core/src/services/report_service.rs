use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::money::Money;
use crate::models::report::{CategoryShare, CumulativePoint, PeriodReport, ReportPeriod, TrendPoint};
use crate::models::transaction::{Transaction, TransactionType};
use crate::services::metrics::{percentage_of, savings_rate};

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Builds weekly / monthly / yearly income and expense reports from
/// transactions.
///
/// Each report covers the period containing the anchor date and splits it
/// into a trend series:
/// - weekly: one bucket per weekday, Monday first
/// - monthly: `Week 1`..`Week 5` by day of month (days 1-7, 8-14, ...)
/// - yearly: one bucket per month
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// First and last day (inclusive) of the period containing `anchor`.
    pub fn period_bounds(
        &self,
        period: ReportPeriod,
        anchor: NaiveDate,
    ) -> Result<(NaiveDate, NaiveDate), CoreError> {
        let out_of_range = || CoreError::InvalidDate(anchor.to_string());
        match period {
            ReportPeriod::Weekly => {
                let offset = i64::from(anchor.weekday().num_days_from_monday());
                let from = anchor
                    .checked_sub_signed(Duration::days(offset))
                    .ok_or_else(out_of_range)?;
                let to = from
                    .checked_add_signed(Duration::days(6))
                    .ok_or_else(out_of_range)?;
                Ok((from, to))
            }
            ReportPeriod::Monthly => {
                let from = anchor.with_day(1).ok_or_else(out_of_range)?;
                let next_month = if anchor.month() == 12 {
                    NaiveDate::from_ymd_opt(anchor.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(anchor.year(), anchor.month() + 1, 1)
                };
                let to = next_month.and_then(|d| d.pred_opt()).ok_or_else(out_of_range)?;
                Ok((from, to))
            }
            ReportPeriod::Yearly => {
                let from = NaiveDate::from_ymd_opt(anchor.year(), 1, 1).ok_or_else(out_of_range)?;
                let to = NaiveDate::from_ymd_opt(anchor.year(), 12, 31).ok_or_else(out_of_range)?;
                Ok((from, to))
            }
        }
    }

    /// Generate the report for the period containing `anchor`.
    /// Transactions outside the period are ignored.
    pub fn generate(
        &self,
        transactions: &[Transaction],
        period: ReportPeriod,
        anchor: NaiveDate,
    ) -> Result<PeriodReport, CoreError> {
        let (from, to) = self.period_bounds(period, anchor)?;
        let mut trend = Self::empty_trend(period, from, to);

        let mut total_income = Money::ZERO;
        let mut total_expenses = Money::ZERO;
        let mut by_category: HashMap<&str, Money> = HashMap::new();

        for t in transactions.iter().filter(|t| t.date >= from && t.date <= to) {
            let bucket = Self::bucket_index(period, from, t.date);
            let point = &mut trend[bucket];
            match t.transaction_type {
                TransactionType::Income => {
                    total_income += t.amount;
                    point.income += t.amount;
                }
                TransactionType::Expense => {
                    total_expenses += t.amount;
                    point.expenses += t.amount;
                    *by_category.entry(t.category.as_str()).or_insert(Money::ZERO) += t.amount;
                }
            }
        }

        let net_savings = total_income - total_expenses;

        let mut category_breakdown: Vec<CategoryShare> = by_category
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                category: category.to_string(),
                amount,
                percentage: percentage_of(amount, total_expenses),
            })
            .collect();
        // Largest first; ties broken by name so the order is stable
        category_breakdown.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.category.cmp(&b.category))
        });

        let mut running = Money::ZERO;
        let cumulative_savings = trend
            .iter()
            .map(|p| {
                running += p.net();
                CumulativePoint {
                    label: p.label.clone(),
                    savings: running,
                }
            })
            .collect();

        debug!(
            ?period,
            %from,
            %to,
            income = %total_income,
            expenses = %total_expenses,
            "Generated report"
        );

        Ok(PeriodReport {
            period,
            title: period.title().to_string(),
            from,
            to,
            total_income,
            total_expenses,
            net_savings,
            savings_rate: savings_rate(net_savings, total_income),
            trend,
            category_breakdown,
            cumulative_savings,
        })
    }

    fn empty_trend(period: ReportPeriod, from: NaiveDate, to: NaiveDate) -> Vec<TrendPoint> {
        let labels: Vec<String> = match period {
            ReportPeriod::Weekly => WEEKDAY_LABELS.iter().map(|l| l.to_string()).collect(),
            ReportPeriod::Monthly => {
                let weeks = Self::bucket_index(period, from, to) + 1;
                (1..=weeks).map(|w| format!("Week {w}")).collect()
            }
            ReportPeriod::Yearly => MONTH_LABELS.iter().map(|l| l.to_string()).collect(),
        };
        labels
            .into_iter()
            .map(|label| TrendPoint {
                label,
                income: Money::ZERO,
                expenses: Money::ZERO,
            })
            .collect()
    }

    /// Trend bucket for `date`; `date` must lie inside the period starting at `from`.
    fn bucket_index(period: ReportPeriod, from: NaiveDate, date: NaiveDate) -> usize {
        match period {
            ReportPeriod::Weekly => (date - from).num_days() as usize,
            ReportPeriod::Monthly => (date.day0() / 7) as usize,
            ReportPeriod::Yearly => date.month0() as usize,
        }
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
