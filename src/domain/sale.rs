use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::round2;

/// Database-assigned row id (INTEGER PRIMARY KEY AUTOINCREMENT, never reused).
pub type SaleId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    /// The customer still owes the total price
    Unpaid,
    /// The customer has settled up
    Paid,
}

impl SettlementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementStatus::Unpaid => "unpaid",
            SettlementStatus::Paid => "paid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "unpaid" => Some(SettlementStatus::Unpaid),
            "paid" => Some(SettlementStatus::Paid),
            _ => None,
        }
    }

    /// The opposite status. Toggling twice is the identity.
    pub fn toggled(&self) -> Self {
        match self {
            SettlementStatus::Unpaid => SettlementStatus::Paid,
            SettlementStatus::Paid => SettlementStatus::Unpaid,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, SettlementStatus::Paid)
    }
}

impl std::fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One sale: a weighed amount of goods sold to a named customer at a unit
/// price. `total_price` is fixed at creation; the only mutable field is the
/// settlement status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub customer_name: String,
    pub weight: f64,
    pub unit_price: f64,
    /// round(weight * unit_price, 2), stored at insert and never recomputed
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub status: SettlementStatus,
}

/// A sale that has been validated but not yet persisted.
/// The repository assigns the id on insert.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub customer_name: String,
    pub weight: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub status: SettlementStatus,
}

impl NewSale {
    /// Create a new unpaid sale timestamped now.
    /// Callers must validate inputs first; see `LedgerService::add_sale`.
    pub fn new(customer_name: impl Into<String>, weight: f64, unit_price: f64) -> Self {
        Self {
            customer_name: customer_name.into(),
            weight,
            unit_price,
            total_price: round2(weight * unit_price),
            created_at: Utc::now(),
            status: SettlementStatus::Unpaid,
        }
    }

    /// The persisted record this draft becomes once the database assigns an id.
    pub fn into_sale(self, id: SaleId) -> Sale {
        Sale {
            id,
            customer_name: self.customer_name,
            weight: self.weight,
            unit_price: self.unit_price,
            total_price: self.total_price,
            created_at: self.created_at,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [SettlementStatus::Unpaid, SettlementStatus::Paid] {
            let s = status.as_str();
            assert_eq!(SettlementStatus::from_str(s), Some(status));
        }
    }

    #[test]
    fn test_status_toggle_is_involution() {
        for status in [SettlementStatus::Unpaid, SettlementStatus::Paid] {
            assert_ne!(status.toggled(), status);
            assert_eq!(status.toggled().toggled(), status);
        }
    }

    #[test]
    fn test_new_sale_computes_total() {
        let sale = NewSale::new("A", 10.0, 18.0);
        assert_eq!(sale.total_price, 180.0);
        assert_eq!(sale.status, SettlementStatus::Unpaid);
    }

    #[test]
    fn test_new_sale_rounds_total_to_two_decimals() {
        // 3.33 * 9.99 = 33.2667
        let sale = NewSale::new("B", 3.33, 9.99);
        assert_eq!(sale.total_price, 33.27);
    }

    #[test]
    fn test_into_sale_keeps_fields() {
        let draft = NewSale::new("C", 5.0, 20.0);
        let created_at = draft.created_at;
        let sale = draft.into_sale(42);
        assert_eq!(sale.id, 42);
        assert_eq!(sale.customer_name, "C");
        assert_eq!(sale.total_price, 100.0);
        assert_eq!(sale.created_at, created_at);
    }
}
