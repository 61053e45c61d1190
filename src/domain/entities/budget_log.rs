//! Per-URL budget contribution rows written by budget recalculation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// One URL's contribution to a recalculated campaign budget.
///
/// Appended on every recalculation pass; the log is a history, not a
/// current-state table.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLogEntry {
    pub id: i64,
    pub url_id: i64,
    pub campaign_id: i64,
    /// Dollar value of the URL's remaining clicks at recalculation time.
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Input row for the budget log.
#[derive(Debug, Clone)]
pub struct NewBudgetLogEntry {
    pub url_id: i64,
    pub campaign_id: i64,
    pub price: Decimal,
}
