use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::application::{LedgerService, QueryResult};
use crate::domain::{format_amount, LedgerSummary, Sale, SaleId};
use crate::io::Exporter;

/// Unit price prefilled by the original till; used when --price is omitted.
const DEFAULT_UNIT_PRICE: f64 = 18.0;

/// Porgo - Pork Vendor Sales Ledger
#[derive(Parser)]
#[command(name = "porgo")]
#[command(about = "A local-first point-of-sale ledger for a small pork vendor")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "porgo.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record a sale
    Add {
        /// Customer name
        name: String,

        /// Weight sold (e.g. "10" or "2.5")
        weight: f64,

        /// Unit price (defaults to the till price)
        #[arg(short, long, default_value_t = DEFAULT_UNIT_PRICE)]
        price: f64,
    },

    /// List all sales with running totals, most recent first
    List,

    /// Query sales by customer name (case-sensitive substring match)
    Query {
        /// Name or part of a name to search for
        name: String,
    },

    /// Flip the settlement status (paid/unpaid) of a sale
    Toggle {
        /// Sale id
        id: SaleId,
    },

    /// Delete a sale
    Delete {
        /// Sale id
        id: SaleId,
    },

    /// Show one sale in detail
    Show {
        /// Sale id
        id: SaleId,
    },

    /// Export the ledger to CSV or JSON
    Export {
        /// Output file ("-" for stdout; default: timestamped CSV in the
        /// download directory if present, else the working directory)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Add {
                name,
                weight,
                price,
            } => {
                let service = LedgerService::init(&self.database).await?;
                let sale = service.add_sale(&name, weight, price).await?;
                println!(
                    "Recorded sale #{}: {} x {} @ {} = {}",
                    sale.id,
                    sale.customer_name,
                    format_amount(sale.weight),
                    format_amount(sale.unit_price),
                    format_amount(sale.total_price)
                );
            }

            Commands::List => {
                let service = LedgerService::init(&self.database).await?;
                run_list_command(&service).await?;
            }

            Commands::Query { name } => {
                let service = LedgerService::init(&self.database).await?;
                run_query_command(&service, &name).await?;
            }

            Commands::Toggle { id } => {
                let service = LedgerService::init(&self.database).await?;
                match service.toggle_status(id).await? {
                    Some(sale) => println!("Sale #{} is now {}", sale.id, sale.status),
                    None => println!("No sale with id {}", id),
                }
            }

            Commands::Delete { id } => {
                let service = LedgerService::init(&self.database).await?;
                if service.delete_sale(id).await? {
                    println!("Deleted sale #{}", id);
                } else {
                    println!("No sale with id {}", id);
                }
            }

            Commands::Show { id } => {
                let service = LedgerService::init(&self.database).await?;
                match service.get_sale(id).await? {
                    Some(sale) => print_sale_detail(&sale),
                    None => println!("No sale with id {}", id),
                }
            }

            Commands::Export { output, format } => {
                let service = LedgerService::init(&self.database).await?;
                run_export_command(&service, output.as_deref(), &format).await?;
            }
        }

        Ok(())
    }
}

async fn run_list_command(service: &LedgerService) -> Result<()> {
    let view = service.ledger_view().await?;
    if view.sales.is_empty() {
        println!("No sales recorded.");
        return Ok(());
    }

    print_sales_table(&view.sales);
    println!();
    print_summary_bar(&view.summary);
    Ok(())
}

async fn run_query_command(service: &LedgerService, name: &str) -> Result<()> {
    let result: QueryResult = service.query_by_name(name).await?;

    if result.sales.is_empty() {
        println!("No sales matching \"{}\".", result.pattern);
        return Ok(());
    }

    match result.customer_names.as_slice() {
        [only] => println!("Customer: {}", only),
        names => println!(
            "Search \"{}\" matched {} customers",
            result.pattern,
            names.len()
        ),
    }
    println!();
    print_sales_table(&result.sales);
    println!();
    print_summary_bar(&result.summary);
    Ok(())
}

async fn run_export_command(
    service: &LedgerService,
    output: Option<&str>,
    format: &str,
) -> Result<()> {
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    match format {
        "csv" => match output {
            None => {
                let (path, count) = exporter.export_to_download_dir().await?;
                println!("Exported {} sales to {}", count, path.display());
            }
            Some("-") => {
                exporter.export_sales_csv(stdout().lock()).await?;
            }
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path))?;
                let count = exporter.export_sales_csv(file).await?;
                println!("Exported {} sales to {}", count, path);
            }
        },
        "json" => {
            let writer: Box<dyn Write> = match output {
                None | Some("-") => Box::new(stdout().lock()),
                Some(path) => Box::new(
                    File::create(path)
                        .with_context(|| format!("Failed to create output file: {}", path))?,
                ),
            };
            let snapshot = exporter.export_full_json(writer).await?;
            if let Some(path) = output.filter(|p| *p != "-") {
                println!("Exported {} sales to {}", snapshot.sales.len(), path);
            }
        }
        other => anyhow::bail!("Unknown export format '{}'. Use csv or json", other),
    }

    Ok(())
}

fn print_sales_table(sales: &[Sale]) {
    println!(
        "{:<6} {:<16} {:>8} {:>8} {:>10} {:<8} {:<17}",
        "ID", "CUSTOMER", "WEIGHT", "PRICE", "TOTAL", "STATUS", "DATE"
    );
    println!("{}", "-".repeat(78));
    for sale in sales {
        println!(
            "{:<6} {:<16} {:>8} {:>8} {:>10} {:<8} {:<17}",
            sale.id,
            sale.customer_name,
            format_amount(sale.weight),
            format_amount(sale.unit_price),
            format_amount(sale.total_price),
            sale.status.to_string(),
            sale.created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
        );
    }
}

fn print_summary_bar(summary: &LedgerSummary) {
    println!(
        "Total weight: {}   Total amount: {}   Outstanding: {}",
        format_amount(summary.total_weight),
        format_amount(summary.total_amount),
        format_amount(summary.total_unpaid_amount)
    );
}

fn print_sale_detail(sale: &Sale) {
    println!("Sale #{}", sale.id);
    println!("  Customer:   {}", sale.customer_name);
    println!("  Weight:     {}", format_amount(sale.weight));
    println!("  Unit price: {}", format_amount(sale.unit_price));
    println!("  Total:      {}", format_amount(sale.total_price));
    println!("  Status:     {}", sale.status);
    println!(
        "  Recorded:   {}",
        sale.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    );
}
