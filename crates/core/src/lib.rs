pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use models::{
    book::Book,
    budget::Budget,
    debt::{Debt, DebtStatus},
    ledger::Record,
    money::Money,
    report::{PeriodReport, ReportPeriod},
    savings_goal::SavingsGoal,
    settings::Settings,
    subscription::Subscription,
    summary::DashboardSummary,
    transaction::{Transaction, TransactionFilter, TransactionSortOrder},
};
use services::{metrics, report_service::ReportService, transaction_service::TransactionService};
use storage::manager::StorageManager;
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the Finance Tracker core library.
/// Holds every record collection plus settings, and the services that
/// derive figures from them.
///
/// Display currency is not held here; it lives in a
/// per-session [`services::currency_service::CurrencySession`].
#[must_use]
pub struct FinanceTracker {
    book: Book,
    transaction_service: TransactionService,
    report_service: ReportService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for FinanceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("transactions", &self.book.transactions.len())
            .field("budgets", &self.book.budgets.len())
            .field("savings_goals", &self.book.savings_goals.len())
            .field("debts", &self.book.debts.len())
            .field("subscriptions", &self.book.subscriptions.len())
            .field("settings", &self.book.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for FinanceTracker {
    fn default() -> Self {
        Self::create_new()
    }
}

impl FinanceTracker {
    /// Create an empty tracker with default settings.
    pub fn create_new() -> Self {
        Self::build(Book::default())
    }

    /// Create an empty tracker with the given settings.
    pub fn with_settings(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(Book {
            settings,
            ..Book::default()
        }))
    }

    /// Wrap an existing book, validating every record first.
    pub fn from_book(book: Book) -> Result<Self, CoreError> {
        book.validate()?;
        Ok(Self::build(book))
    }

    /// Load a tracker from JSON bytes produced by [`FinanceTracker::save_to_bytes`].
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        let book = StorageManager::load_from_bytes(data)?;
        Ok(Self::build(book))
    }

    /// Serialize to JSON bytes. Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.book)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load from a JSON file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let book = StorageManager::load_from_file(path)?;
        Ok(Self::build(book))
    }

    /// Save to a JSON file on disk (native only, not WASM).
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.book, path)?;
        self.dirty = false;
        Ok(())
    }

    fn build(book: Book) -> Self {
        Self {
            book,
            transaction_service: TransactionService::new(),
            report_service: ReportService::new(),
            dirty: false,
        }
    }

    #[must_use]
    pub fn book(&self) -> &Book {
        &self.book
    }

    /// Whether anything changed since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.book.settings
    }

    pub fn set_settings(&mut self, settings: Settings) -> Result<(), CoreError> {
        settings.validate()?;
        self.book.settings = settings;
        self.dirty = true;
        Ok(())
    }

    // ── Transactions ────────────────────────────────────────────────

    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<Uuid, CoreError> {
        let id = self.book.transactions.add(transaction)?;
        self.dirty = true;
        Ok(id)
    }

    /// Edit a transaction in place. The id cannot be changed.
    pub fn update_transaction<F>(&mut self, id: Uuid, apply: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Transaction),
    {
        self.book.transactions.update(id, apply)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Result<Transaction, CoreError> {
        let removed = self.book.transactions.remove(id)?;
        self.dirty = true;
        Ok(removed)
    }

    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        self.book.transactions.records()
    }

    /// Search descriptions (case-insensitive) and filter by type.
    #[must_use]
    pub fn search_transactions(&self, query: &str, filter: TransactionFilter) -> Vec<&Transaction> {
        self.transaction_service
            .search(self.transactions(), query, filter)
    }

    #[must_use]
    pub fn transactions_sorted(&self, order: TransactionSortOrder) -> Vec<&Transaction> {
        self.transaction_service.sorted(self.transactions(), order)
    }

    #[must_use]
    pub fn recurring_transactions(&self) -> Vec<&Transaction> {
        self.transaction_service.recurring(self.transactions())
    }

    // ── Budgets ─────────────────────────────────────────────────────

    pub fn add_budget(&mut self, budget: Budget) -> Result<Uuid, CoreError> {
        let id = self.book.budgets.add(budget)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_budget<F>(&mut self, id: Uuid, apply: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Budget),
    {
        self.book.budgets.update(id, apply)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_budget(&mut self, id: Uuid) -> Result<Budget, CoreError> {
        let removed = self.book.budgets.remove(id)?;
        self.dirty = true;
        Ok(removed)
    }

    #[must_use]
    pub fn budgets(&self) -> &[Budget] {
        self.book.budgets.records()
    }

    /// Budgets at or past the configured alert ratio, judged on their
    /// current spend.
    #[must_use]
    pub fn budget_alerts(&self) -> Vec<&Budget> {
        let ratio = self.book.settings.budget_alert_ratio;
        self.budgets()
            .iter()
            .filter(|b| metrics::is_budget_alert(b, ratio))
            .collect()
    }

    // ── Savings Goals ───────────────────────────────────────────────

    pub fn add_savings_goal(&mut self, goal: SavingsGoal) -> Result<Uuid, CoreError> {
        let id = self.book.savings_goals.add(goal)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_savings_goal<F>(&mut self, id: Uuid, apply: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut SavingsGoal),
    {
        self.book.savings_goals.update(id, apply)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_savings_goal(&mut self, id: Uuid) -> Result<SavingsGoal, CoreError> {
        let removed = self.book.savings_goals.remove(id)?;
        self.dirty = true;
        Ok(removed)
    }

    #[must_use]
    pub fn savings_goals(&self) -> &[SavingsGoal] {
        self.book.savings_goals.records()
    }

    // ── Debts ───────────────────────────────────────────────────────

    pub fn add_debt(&mut self, debt: Debt) -> Result<Uuid, CoreError> {
        let id = self.book.debts.add(debt)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_debt<F>(&mut self, id: Uuid, apply: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Debt),
    {
        self.book.debts.update(id, apply)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_debt(&mut self, id: Uuid) -> Result<Debt, CoreError> {
        let removed = self.book.debts.remove(id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Mark a debt as paid. Paid debts drop out of totals and upcoming lists.
    pub fn mark_debt_paid(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.update_debt(id, |d| d.status = DebtStatus::Paid)
    }

    #[must_use]
    pub fn debts(&self) -> &[Debt] {
        self.book.debts.records()
    }

    /// Active debts due within the configured window of `today`, overdue included.
    #[must_use]
    pub fn upcoming_debts(&self, today: NaiveDate) -> Vec<&Debt> {
        metrics::upcoming_within(self.debts(), today, self.book.settings.upcoming_window_days)
    }

    // ── Subscriptions ───────────────────────────────────────────────

    pub fn add_subscription(&mut self, subscription: Subscription) -> Result<Uuid, CoreError> {
        let id = self.book.subscriptions.add(subscription)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_subscription<F>(&mut self, id: Uuid, apply: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Subscription),
    {
        self.book.subscriptions.update(id, apply)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_subscription(&mut self, id: Uuid) -> Result<Subscription, CoreError> {
        let removed = self.book.subscriptions.remove(id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Flip a subscription between active and cancelled.
    pub fn toggle_subscription_status(&mut self, id: Uuid) -> Result<(), CoreError> {
        self.update_subscription(id, |s| s.status = s.status.toggled())
    }

    #[must_use]
    pub fn subscriptions(&self) -> &[Subscription] {
        self.book.subscriptions.records()
    }

    /// Active subscriptions renewing within the configured window of `today`.
    #[must_use]
    pub fn upcoming_renewals(&self, today: NaiveDate) -> Vec<&Subscription> {
        metrics::upcoming_within(
            self.subscriptions(),
            today,
            self.book.settings.upcoming_window_days,
        )
    }

    #[must_use]
    pub fn monthly_subscription_cost(&self) -> Money {
        metrics::monthly_equivalent_cost(self.subscriptions())
    }

    // ── Summaries & Reports ─────────────────────────────────────────

    /// Headline dashboard figures as of `today`.
    pub fn dashboard_summary(&self, today: NaiveDate) -> DashboardSummary {
        let transactions = self.transactions();
        let total_income = metrics::total_income(transactions);
        let total_expenses = metrics::total_expenses(transactions);
        let goals = self.savings_goals();
        let total_saved = metrics::sum_by(goals, |_| true, |g| g.current_amount);
        let total_savings_target = metrics::sum_by(goals, |_| true, |g| g.target_amount);

        DashboardSummary {
            as_of_date: today,
            total_income,
            total_expenses,
            net_balance: total_income - total_expenses,
            total_budget: metrics::total_budget_limit(self.budgets()),
            total_spent: metrics::total_budget_spent(self.budgets()),
            budget_alert_count: self.budget_alerts().len(),
            total_saved,
            total_savings_target,
            savings_progress_pct: metrics::percentage_of(total_saved, total_savings_target),
            total_active_debt: metrics::total_active_debt(self.debts()),
            upcoming_debts: self.upcoming_debts(today).into_iter().cloned().collect(),
            upcoming_renewals: self.upcoming_renewals(today).into_iter().cloned().collect(),
            monthly_subscription_cost: self.monthly_subscription_cost(),
        }
    }

    /// Income/expense report for the period containing `anchor`.
    pub fn report(&self, period: ReportPeriod, anchor: NaiveDate) -> Result<PeriodReport, CoreError> {
        self.report_service
            .generate(self.transactions(), period, anchor)
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export the full book as pretty JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.book)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize book: {e}")))
    }

    /// Import transactions from a JSON array, appending them in order.
    /// Nothing is imported if any of them is invalid.
    pub fn import_transactions_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let incoming: Vec<Transaction> = serde_json::from_str(json)?;
        let mut staged = self.book.transactions.clone();
        for transaction in incoming.iter().cloned() {
            staged.add(transaction)?;
        }
        self.book.transactions = staged;
        self.dirty = true;
        tracing::debug!(count = incoming.len(), kind = Transaction::KIND, "imported records");
        Ok(incoming.len())
    }
}
