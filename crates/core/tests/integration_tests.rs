// ═══════════════════════════════════════════════════════════════════
// Integration Tests — FinanceTracker end to end
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rust_decimal::Decimal;

use finance_tracker_core::errors::CoreError;
use finance_tracker_core::models::budget::{Budget, BudgetPeriod};
use finance_tracker_core::models::currency::Currency;
use finance_tracker_core::models::debt::{Debt, DebtCategory, DebtStatus};
use finance_tracker_core::models::money::Money;
use finance_tracker_core::models::report::ReportPeriod;
use finance_tracker_core::models::savings_goal::SavingsGoal;
use finance_tracker_core::models::settings::Settings;
use finance_tracker_core::models::subscription::{Frequency, Subscription, SubscriptionStatus};
use finance_tracker_core::models::transaction::{
    Transaction, TransactionFilter, TransactionSortOrder, TransactionType,
};
use finance_tracker_core::services::currency_service::CurrencySession;
use finance_tracker_core::storage::preferences::MemoryPreferences;
use finance_tracker_core::FinanceTracker;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn units(n: i64) -> Money {
    Money::from_units(n)
}

/// A tracker seeded with a small but complete household.
fn seeded() -> FinanceTracker {
    let mut t = FinanceTracker::create_new();
    t.add_transaction(Transaction::income("Monthly Salary", units(5500), "Income", d(2025, 1, 1)).recurring())
        .unwrap();
    t.add_transaction(Transaction::expense("Grocery Shopping", Money::from_cents(8550), "Food", d(2025, 1, 2)))
        .unwrap();
    t.add_transaction(Transaction::expense("Rent", units(1200), "Housing", d(2025, 1, 3)).recurring())
        .unwrap();

    t.add_budget(Budget::new("Dining", units(250), units(195), BudgetPeriod::Monthly)).unwrap();
    t.add_budget(Budget::new("Groceries", units(500), units(420), BudgetPeriod::Monthly)).unwrap();
    t.add_budget(Budget::new("Fuel", units(200), units(50), BudgetPeriod::Weekly)).unwrap();

    t.add_savings_goal(SavingsGoal::new("Emergency Fund", units(10000), units(6500), d(2025, 12, 31)))
        .unwrap();
    t.add_savings_goal(SavingsGoal::new("Vacation", units(2000), units(1500), d(2025, 7, 15)).with_emoji("✈️"))
        .unwrap();

    t.add_debt(Debt::new("Chase", units(1200), Decimal::new(185, 1), d(2025, 1, 12), DebtCategory::CreditCard))
        .unwrap();
    t.add_debt(Debt::new("Bank", units(8000), Decimal::new(45, 1), d(2025, 3, 1), DebtCategory::Loan))
        .unwrap();

    t.add_subscription(Subscription::new("Netflix", Money::from_cents(1599), d(2025, 1, 14), Frequency::Monthly, "Entertainment"))
        .unwrap();
    t.add_subscription(Subscription::new("Cloud", units(120), d(2025, 6, 1), Frequency::Yearly, "Software"))
        .unwrap();
    t
}

// ═══════════════════════════════════════════════════════════════════
//  Lifecycle & dirty tracking
// ═══════════════════════════════════════════════════════════════════

mod lifecycle {
    use super::*;

    #[test]
    fn new_tracker_is_clean_and_empty() {
        let t = FinanceTracker::default();
        assert!(!t.has_unsaved_changes());
        assert!(t.transactions().is_empty());
        assert_eq!(t.settings(), &Settings::default());
    }

    #[test]
    fn mutation_marks_dirty_and_save_clears() {
        let mut t = FinanceTracker::create_new();
        t.add_transaction(Transaction::expense("Coffee", units(3), "Food", d(2025, 1, 1)))
            .unwrap();
        assert!(t.has_unsaved_changes());

        let _ = t.save_to_bytes().unwrap();
        assert!(!t.has_unsaved_changes());
    }

    #[test]
    fn failed_mutation_leaves_tracker_clean() {
        let mut t = FinanceTracker::create_new();
        let err = t
            .add_transaction(Transaction::expense("Coffee", Money::ZERO, "Food", d(2025, 1, 1)))
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(!t.has_unsaved_changes());
        assert!(t.transactions().is_empty());
    }

    #[test]
    fn with_settings_rejects_invalid() {
        let settings = Settings {
            budget_alert_ratio: Decimal::ZERO,
            ..Settings::default()
        };
        assert!(FinanceTracker::with_settings(settings).is_err());
    }

    #[test]
    fn set_settings_validates() {
        let mut t = FinanceTracker::create_new();
        let bad = Settings {
            upcoming_window_days: -1,
            ..Settings::default()
        };
        assert!(t.set_settings(bad).is_err());
        assert!(!t.has_unsaved_changes());

        let good = Settings {
            default_currency: Currency::USD,
            ..Settings::default()
        };
        t.set_settings(good).unwrap();
        assert_eq!(t.settings().default_currency, Currency::USD);
        assert!(t.has_unsaved_changes());
    }

    #[test]
    fn bytes_roundtrip_preserves_everything() {
        let mut t = seeded();
        let bytes = t.save_to_bytes().unwrap();
        let loaded = FinanceTracker::load_from_bytes(&bytes).unwrap();
        assert_eq!(loaded.book(), t.book());
        assert!(!loaded.has_unsaved_changes());
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finances.json");
        let path = path.to_str().unwrap();

        let mut t = seeded();
        t.save_to_file(path).unwrap();
        assert!(!t.has_unsaved_changes());

        let loaded = FinanceTracker::load_from_file(path).unwrap();
        assert_eq!(loaded.debts().len(), 2);
        assert_eq!(loaded.subscriptions()[0].name, "Netflix");
    }

    #[test]
    fn from_book_validates() {
        let mut book = seeded().book().clone();
        book.settings.budget_alert_ratio = Decimal::new(-1, 0);
        assert!(FinanceTracker::from_book(book).is_err());
    }

    #[test]
    fn debug_shows_counts() {
        let dbg = format!("{:?}", seeded());
        assert!(dbg.contains("transactions: 3"));
        assert!(dbg.contains("dirty: true"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Record operations
// ═══════════════════════════════════════════════════════════════════

mod records {
    use super::*;

    #[test]
    fn update_and_remove_transaction() {
        let mut t = seeded();
        let id = t.transactions()[1].id;

        t.update_transaction(id, |tx| tx.amount = units(90)).unwrap();
        assert_eq!(t.transactions()[1].amount, units(90));

        let removed = t.remove_transaction(id).unwrap();
        assert_eq!(removed.description, "Grocery Shopping");
        assert_eq!(t.transactions().len(), 2);
        assert!(matches!(t.remove_transaction(id), Err(CoreError::RecordNotFound(_))));
    }

    #[test]
    fn mark_debt_paid_drops_it_from_totals() {
        let mut t = seeded();
        let chase = t.debts()[0].id;
        let today = d(2025, 1, 10);

        assert_eq!(t.dashboard_summary(today).total_active_debt, units(9200));
        t.mark_debt_paid(chase).unwrap();

        assert_eq!(t.debts()[0].status, DebtStatus::Paid);
        let summary = t.dashboard_summary(today);
        assert_eq!(summary.total_active_debt, units(8000));
        assert!(summary.upcoming_debts.is_empty());
    }

    #[test]
    fn toggle_subscription_twice_restores() {
        let mut t = seeded();
        let id = t.subscriptions()[0].id;

        t.toggle_subscription_status(id).unwrap();
        assert_eq!(t.subscriptions()[0].status, SubscriptionStatus::Cancelled);
        assert_eq!(t.monthly_subscription_cost(), units(10));

        t.toggle_subscription_status(id).unwrap();
        assert_eq!(t.subscriptions()[0].status, SubscriptionStatus::Active);
    }

    #[test]
    fn budget_update_recomputes_alerts() {
        let mut t = seeded();
        let names: Vec<&str> = t.budget_alerts().iter().map(|b| b.category.as_str()).collect();
        assert_eq!(names, vec!["Groceries"]);

        let dining = t.budgets()[0].id;
        t.update_budget(dining, |b| b.spent = units(200)).unwrap();
        assert_eq!(t.budget_alerts().len(), 2);

        t.update_budget(dining, |b| b.limit = units(1000)).unwrap();
        assert_eq!(t.budget_alerts().len(), 1);
    }

    #[test]
    fn alert_ratio_follows_settings() {
        let mut t = seeded();
        t.set_settings(Settings {
            budget_alert_ratio: Decimal::new(75, 2),
            ..Settings::default()
        })
        .unwrap();
        // Dining at 78% now alerts too
        assert_eq!(t.budget_alerts().len(), 2);
    }

    #[test]
    fn savings_goal_operations() {
        let mut t = seeded();
        let id = t.savings_goals()[1].id;
        t.update_savings_goal(id, |g| g.current_amount = units(2000)).unwrap();
        assert_eq!(t.savings_goals()[1].current_amount, units(2000));
        t.remove_savings_goal(id).unwrap();
        assert_eq!(t.savings_goals().len(), 1);
    }

    #[test]
    fn other_removals() {
        let mut t = seeded();
        let b = t.budgets()[2].id;
        let d_id = t.debts()[1].id;
        let s = t.subscriptions()[1].id;
        assert_eq!(t.remove_budget(b).unwrap().category, "Fuel");
        assert_eq!(t.remove_debt(d_id).unwrap().creditor, "Bank");
        assert_eq!(t.remove_subscription(s).unwrap().name, "Cloud");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Views, summary & reports
// ═══════════════════════════════════════════════════════════════════

mod views {
    use super::*;

    #[test]
    fn search_sort_recurring() {
        let t = seeded();
        let hits = t.search_transactions("rent", TransactionFilter::Only(TransactionType::Expense));
        assert_eq!(hits.len(), 1);

        let sorted = t.transactions_sorted(TransactionSortOrder::AmountDesc);
        assert_eq!(sorted[0].description, "Monthly Salary");

        let recurring: Vec<&str> = t
            .recurring_transactions()
            .iter()
            .map(|tx| tx.description.as_str())
            .collect();
        assert_eq!(recurring, vec!["Monthly Salary", "Rent"]);
    }

    #[test]
    fn upcoming_uses_window() {
        let t = seeded();
        let today = d(2025, 1, 10);
        assert_eq!(t.upcoming_debts(today).len(), 1);
        assert_eq!(t.upcoming_renewals(today).len(), 1);
        // Past the Chase due date, still listed as overdue
        assert_eq!(t.upcoming_debts(d(2025, 1, 20)).len(), 1);
    }

    #[test]
    fn dashboard_summary_figures() {
        let t = seeded();
        let s = t.dashboard_summary(d(2025, 1, 10));

        assert_eq!(s.as_of_date, d(2025, 1, 10));
        assert_eq!(s.total_income, units(5500));
        assert_eq!(s.total_expenses, Money::from_cents(128_550));
        assert_eq!(s.net_balance, Money::from_cents(421_450));
        assert_eq!(s.total_budget, units(950));
        assert_eq!(s.total_spent, units(665));
        assert_eq!(s.budget_alert_count, 1);
        assert_eq!(s.total_saved, units(8000));
        assert_eq!(s.total_savings_target, units(12000));
        assert!((s.savings_progress_pct - 66.667).abs() < 1e-3);
        assert_eq!(s.total_active_debt, units(9200));
        assert_eq!(s.upcoming_debts[0].creditor, "Chase");
        assert_eq!(s.upcoming_renewals[0].name, "Netflix");
        assert_eq!(s.monthly_subscription_cost, Money::from_cents(2599));
    }

    #[test]
    fn report_for_month() {
        let t = seeded();
        let report = t.report(ReportPeriod::Monthly, d(2025, 1, 15)).unwrap();
        assert_eq!(report.total_income, units(5500));
        assert_eq!(report.category_breakdown[0].category, "Housing");
        assert_eq!(report.trend[0].expenses, Money::from_cents(128_550));
    }

    #[test]
    fn formatting_summary_through_session() {
        let t = seeded();
        let session = CurrencySession::load_with_settings(MemoryPreferences::new(), t.settings());
        let s = t.dashboard_summary(d(2025, 1, 10));
        // 5,500 × 3,700
        assert_eq!(session.format(s.total_income), "UGX 20,350,000");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  JSON export / import
// ═══════════════════════════════════════════════════════════════════

mod json {
    use super::*;

    #[test]
    fn export_contains_all_collections() {
        let json = seeded().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in ["transactions", "budgets", "savings_goals", "debts", "subscriptions", "settings"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn import_appends() {
        let source = seeded();
        let json = serde_json::to_string(source.transactions()).unwrap();

        let mut target = FinanceTracker::create_new();
        let count = target.import_transactions_from_json(&json).unwrap();

        assert_eq!(count, 3);
        assert_eq!(target.transactions(), source.transactions());
        assert!(target.has_unsaved_changes());
    }

    #[test_log::test]
    fn import_is_all_or_nothing() {
        let mut t = seeded();
        let existing = t.transactions()[0].clone();
        let fresh = Transaction::expense("Book", units(20), "Education", d(2025, 1, 5));
        let json = serde_json::to_string(&vec![fresh, existing]).unwrap();

        t.save_to_bytes().unwrap();

        // Second entry duplicates an existing id
        assert!(t.import_transactions_from_json(&json).is_err());
        assert_eq!(t.transactions().len(), 3);
        assert!(!t.has_unsaved_changes());
    }

    #[test]
    fn import_generates_missing_ids() {
        let json = r#"[
            {"description": "Bakery", "amount": "4.20", "category": "Food",
             "date": "2025-01-06", "transaction_type": "expense"},
            {"description": "Bakery", "amount": "4.20", "category": "Food",
             "date": "2025-01-07", "transaction_type": "expense"}
        ]"#;
        let mut t = FinanceTracker::create_new();
        assert_eq!(t.import_transactions_from_json(json).unwrap(), 2);
        assert_ne!(t.transactions()[0].id, t.transactions()[1].id);
        assert_eq!(t.transactions()[1].amount, Money::from_cents(420));
    }

    #[test]
    fn import_rejects_out_of_range_amount() {
        let json = r#"[{"description": "Typo", "amount": "100000000000000000000000000",
                        "category": "Income", "date": "2025-01-06", "transaction_type": "income"}]"#;
        let mut t = seeded();
        t.save_to_bytes().unwrap();

        let err = t.import_transactions_from_json(json).unwrap_err();

        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(t.transactions().len(), 3);
        assert!(!t.has_unsaved_changes());
        let summary = t.dashboard_summary(d(2025, 1, 10));
        assert_eq!(summary.total_income, units(5500));
    }

    #[test]
    fn import_rejects_malformed_json() {
        let mut t = FinanceTracker::create_new();
        let err = t.import_transactions_from_json("[{").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }
}
