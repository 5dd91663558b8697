use crate::models::transaction::{Transaction, TransactionFilter, TransactionSortOrder};

/// List views over transactions. Views borrow; they never reorder or copy
/// the underlying collection.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Transactions whose description contains `query` (case-insensitive)
    /// and whose type passes `filter`, in stored order. An empty query
    /// matches everything.
    pub fn search<'a>(
        &self,
        transactions: &'a [Transaction],
        query: &str,
        filter: TransactionFilter,
    ) -> Vec<&'a Transaction> {
        let q = query.trim().to_lowercase();
        transactions
            .iter()
            .filter(|t| filter.matches(t.transaction_type))
            .filter(|t| q.is_empty() || t.description.to_lowercase().contains(&q))
            .collect()
    }

    /// All transactions in the given order. Ties keep stored order.
    pub fn sorted<'a>(
        &self,
        transactions: &'a [Transaction],
        order: TransactionSortOrder,
    ) -> Vec<&'a Transaction> {
        let mut view: Vec<&Transaction> = transactions.iter().collect();
        match order {
            TransactionSortOrder::DateDesc => view.sort_by(|a, b| b.date.cmp(&a.date)),
            TransactionSortOrder::DateAsc => view.sort_by(|a, b| a.date.cmp(&b.date)),
            TransactionSortOrder::AmountDesc => view.sort_by(|a, b| b.amount.cmp(&a.amount)),
            TransactionSortOrder::AmountAsc => view.sort_by(|a, b| a.amount.cmp(&b.amount)),
            TransactionSortOrder::CategoryAsc => view.sort_by(|a, b| a.category.cmp(&b.category)),
        }
        view
    }

    /// Recurring transactions only, in stored order.
    pub fn recurring<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| t.recurring).collect()
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}
