use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::application::LedgerService;
use crate::domain::{format_amount, Sale, SettlementStatus};

/// Column headers matching the vendor's existing spreadsheets.
const CSV_HEADER: [&str; 7] = ["数据库ID", "顾客", "重量", "单价", "总价", "时间", "状态"];

/// UTF-8 byte order mark. Spreadsheet apps need it to pick the right encoding
/// for the CJK headers.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Export filename prefix ("pork ledger"), kept from the vendor's existing
/// exports so new files sort next to the old ones.
const EXPORT_PREFIX: &str = "猪肉账本";

/// Probed first so exports land where a phone file manager looks.
const ANDROID_DOWNLOAD_DIR: &str = "/storage/emulated/0/Download";

/// Settlement labels as they appear in the exported spreadsheet.
fn status_label(status: SettlementStatus) -> &'static str {
    match status {
        SettlementStatus::Unpaid => "未结清",
        SettlementStatus::Paid => "已结清",
    }
}

/// Ledger snapshot for full JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub sales: Vec<Sale>,
}

/// Exporter for converting ledger data to spreadsheet and backup formats
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export all sales to CSV: UTF-8 with BOM, localized header row, one row
    /// per sale, oldest first. Returns the number of rows written.
    pub async fn export_sales_csv<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut sales = self.service.list_sales().await?;
        // list_sales is newest first; the spreadsheet reads top-down like the
        // paper ledger, so flip to insertion order
        sales.reverse();

        writer.write_all(UTF8_BOM)?;
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADER)?;

        let mut count = 0;
        for sale in &sales {
            csv_writer.write_record(&[
                sale.id.to_string(),
                sale.customer_name.clone(),
                format_amount(sale.weight),
                format_amount(sale.unit_price),
                format_amount(sale.total_price),
                sale.created_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
                status_label(sale.status).to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full ledger as a JSON snapshot for backup.
    pub async fn export_full_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let sales = self.service.list_sales().await?;

        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            sales,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }

    /// Export all sales as CSV to the default location and return the path.
    pub async fn export_to_download_dir(&self) -> Result<(PathBuf, usize)> {
        let path = default_export_path();
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create export file: {}", path.display()))?;
        let count = self.export_sales_csv(file).await?;
        Ok((path, count))
    }
}

/// Timestamped export filename, `猪肉账本_<YYYYMMDD_HHMMSS>.csv`, placed in
/// the Android download directory when it exists and the working directory
/// otherwise.
pub fn default_export_path() -> PathBuf {
    let filename = format!(
        "{}_{}.csv",
        EXPORT_PREFIX,
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let download_dir = Path::new(ANDROID_DOWNLOAD_DIR);
    if download_dir.is_dir() {
        download_dir.join(filename)
    } else {
        PathBuf::from(filename)
    }
}
