// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use porgo::application::LedgerService;
use porgo::domain::Sale;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Record the two-customer fixture used across tests:
/// A buys 10 @ 18 (=180) and 5 @ 20 (=100), B buys 2 @ 18 (=36).
/// Returns the sales in insertion order.
pub async fn record_fixture_sales(service: &LedgerService) -> Result<Vec<Sale>> {
    let mut sales = Vec::new();
    sales.push(service.add_sale("A", 10.0, 18.0).await?);
    sales.push(service.add_sale("A", 5.0, 20.0).await?);
    sales.push(service.add_sale("B", 2.0, 18.0).await?);
    Ok(sales)
}
