use serde::{Deserialize, Serialize};

use super::{round2, Sale};

/// Aggregate totals over a set of sales. Computed the same way for the full
/// ledger and for any name-filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_weight: f64,
    pub total_amount: f64,
    /// Sum of total_price over sales still marked unpaid
    pub total_unpaid_amount: f64,
}

impl LedgerSummary {
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0.0 && self.total_amount == 0.0
    }
}

/// Sum weights, amounts, and outstanding amounts over the given sales.
/// Pure function, no I/O. Totals are re-rounded to two decimals so display
/// never shows float noise from summing.
pub fn summarize(sales: &[Sale]) -> LedgerSummary {
    let mut total_weight = 0.0;
    let mut total_amount = 0.0;
    let mut total_unpaid_amount = 0.0;

    for sale in sales {
        total_weight += sale.weight;
        total_amount += sale.total_price;
        if !sale.status.is_paid() {
            total_unpaid_amount += sale.total_price;
        }
    }

    LedgerSummary {
        total_weight: round2(total_weight),
        total_amount: round2(total_amount),
        total_unpaid_amount: round2(total_unpaid_amount),
    }
}
