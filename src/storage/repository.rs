use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::domain::{NewSale, Sale, SaleId, SettlementStatus};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying sale records.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Insert a new sale and return it with its database-assigned id.
    pub async fn insert_sale(&self, sale: NewSale) -> Result<Sale> {
        let row = sqlx::query(
            r#"
            INSERT INTO sales (customer_name, weight, unit_price, total_price, created_at, status)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&sale.customer_name)
        .bind(sale.weight)
        .bind(sale.unit_price)
        .bind(sale.total_price)
        .bind(sale.created_at.to_rfc3339())
        .bind(sale.status.as_str())
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert sale")?;

        let id: SaleId = row.get("id");
        Ok(sale.into_sale(id))
    }

    /// Get a sale by id.
    pub async fn get_sale(&self, id: SaleId) -> Result<Option<Sale>> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_name, weight, unit_price, total_price, created_at, status
            FROM sales
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch sale")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_sale(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete a sale. Returns true if a row was removed.
    pub async fn delete_sale(&self, id: SaleId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sales WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete sale")?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the settlement status of a sale. Returns true if a row changed.
    pub async fn set_status(&self, id: SaleId, status: SettlementStatus) -> Result<bool> {
        let result = sqlx::query("UPDATE sales SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update sale status")?;
        Ok(result.rows_affected() > 0)
    }

    /// List all sales, most recent first.
    pub async fn list_sales(&self) -> Result<Vec<Sale>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_name, weight, unit_price, total_price, created_at, status
            FROM sales
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list sales")?;

        rows.iter().map(Self::row_to_sale).collect()
    }

    /// List sales whose customer name contains the given text, most recent
    /// first. Matching is case-sensitive; SQLite LIKE is case-insensitive for
    /// ASCII and would also need wildcard escaping, so instr() is used instead.
    pub async fn list_sales_by_name(&self, pattern: &str) -> Result<Vec<Sale>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_name, weight, unit_price, total_price, created_at, status
            FROM sales
            WHERE instr(customer_name, ?) > 0
            ORDER BY id DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list sales by name")?;

        rows.iter().map(Self::row_to_sale).collect()
    }

    /// Count all sales.
    pub async fn count_sales(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM sales")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count sales")?;
        Ok(row.get("count"))
    }

    fn row_to_sale(row: &sqlx::sqlite::SqliteRow) -> Result<Sale> {
        let created_at_str: String = row.get("created_at");
        let status_str: String = row.get("status");

        Ok(Sale {
            id: row.get("id"),
            customer_name: row.get("customer_name"),
            weight: row.get("weight"),
            unit_price: row.get("unit_price"),
            total_price: row.get("total_price"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
            status: SettlementStatus::from_str(&status_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid settlement status: {}", status_str))?,
        })
    }
}
