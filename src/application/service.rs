use crate::domain::{is_valid_quantity, summarize, LedgerSummary, NewSale, Sale, SaleId};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations for the sales ledger.
/// This is the primary interface for any client (CLI, UI, etc.).
pub struct LedgerService {
    repo: Repository,
}

/// A view over the ledger: the matching sales (newest first) plus their
/// aggregate totals.
pub struct LedgerView {
    pub sales: Vec<Sale>,
    pub summary: LedgerSummary,
}

/// Result of a name query: the matching sales plus the distinct customer
/// names they belong to (a substring can match several customers).
pub struct QueryResult {
    pub pattern: String,
    pub sales: Vec<Sale>,
    pub summary: LedgerSummary,
    pub customer_names: Vec<String>,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Open the database at the given path, creating the file and the schema
    /// when absent.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Record a new sale. The total price is fixed here at
    /// round(weight * unit_price, 2) and never recomputed afterwards.
    pub async fn add_sale(
        &self,
        customer_name: &str,
        weight: f64,
        unit_price: f64,
    ) -> Result<Sale, AppError> {
        let customer_name = customer_name.trim();
        if customer_name.is_empty() {
            return Err(AppError::EmptyCustomerName);
        }
        if !is_valid_quantity(weight) {
            return Err(AppError::InvalidWeight(weight));
        }
        if !is_valid_quantity(unit_price) {
            return Err(AppError::InvalidUnitPrice(unit_price));
        }

        let sale = self
            .repo
            .insert_sale(NewSale::new(customer_name, weight, unit_price))
            .await?;
        Ok(sale)
    }

    /// Get a single sale by id.
    pub async fn get_sale(&self, id: SaleId) -> Result<Option<Sale>, AppError> {
        Ok(self.repo.get_sale(id).await?)
    }

    /// Delete a sale. Returns false (not an error) when the id is unknown;
    /// other records are never affected.
    pub async fn delete_sale(&self, id: SaleId) -> Result<bool, AppError> {
        Ok(self.repo.delete_sale(id).await?)
    }

    /// Flip the settlement status of a sale (paid <-> unpaid) and return the
    /// updated record. Returns None (not an error) when the id is unknown.
    pub async fn toggle_status(&self, id: SaleId) -> Result<Option<Sale>, AppError> {
        let Some(sale) = self.repo.get_sale(id).await? else {
            return Ok(None);
        };

        let status = sale.status.toggled();
        self.repo.set_status(id, status).await?;
        Ok(Some(Sale { status, ..sale }))
    }

    /// List all sales, most recent first.
    pub async fn list_sales(&self) -> Result<Vec<Sale>, AppError> {
        Ok(self.repo.list_sales().await?)
    }

    /// The full ledger with its aggregate totals.
    pub async fn ledger_view(&self) -> Result<LedgerView, AppError> {
        let sales = self.repo.list_sales().await?;
        let summary = summarize(&sales);
        Ok(LedgerView { sales, summary })
    }

    /// Query sales by customer name (case-sensitive substring match), newest
    /// first, with the aggregate totals over the matches.
    pub async fn query_by_name(&self, pattern: &str) -> Result<QueryResult, AppError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(AppError::EmptyQuery);
        }

        let sales = self.repo.list_sales_by_name(pattern).await?;
        let summary = summarize(&sales);

        let mut customer_names: Vec<String> = Vec::new();
        for sale in &sales {
            if !customer_names.contains(&sale.customer_name) {
                customer_names.push(sale.customer_name.clone());
            }
        }

        Ok(QueryResult {
            pattern: pattern.to_string(),
            sales,
            summary,
            customer_names,
        })
    }

    /// Total number of records in the ledger.
    pub async fn count_sales(&self) -> Result<i64, AppError> {
        Ok(self.repo.count_sales().await?)
    }
}
