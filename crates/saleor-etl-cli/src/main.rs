mod import;
mod resolve;
mod sheet;
#[cfg(test)]
mod test_support;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use saleor_etl_client::CatalogClient;
use saleor_etl_core::AppConfig;
use tracing_subscriber::EnvFilter;

use crate::import::Importer;
use crate::sheet::{extract_sheet, open_sheet, ColumnLayout};

#[derive(Debug, Parser)]
#[command(name = "saleor-etl")]
#[command(about = "Import spreadsheet product catalogs into a Saleor GraphQL API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create or update catalog products from a spreadsheet
    Import {
        /// Workbook to read (defaults to EXCEL_FILE_LOCATION + EXCEL_FILE_NAME)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Maximum number of data rows to read (defaults to SALEOR_ETL_ROW_LIMIT)
        #[arg(long, value_parser = parse_row_limit)]
        limit: Option<usize>,

        /// Print the rows that would be submitted without calling the API
        #[arg(long)]
        dry_run: bool,
    },
    /// Inspect catalog products
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Inspect catalog categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ProductCommands {
    /// Print a product as JSON
    Show { id: String },
    /// Print the id of the product carrying a SKU
    FindSku { sku: String },
    /// Re-send a product's own fields through productUpdate
    Resync { id: String },
}

#[derive(Debug, Subcommand)]
enum CategoryCommands {
    /// Print the id of the category with this exact name
    Find { name: String },
}

/// Rejects `0` the same way `SALEOR_ETL_ROW_LIMIT` does.
fn parse_row_limit(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(limit) => Ok(limit),
        Err(e) => Err(e.to_string()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = saleor_etl_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = CatalogClient::new(&config.api_url, &config.secret, config.request_timeout_secs)
        .context("failed to build catalog client")?;

    match cli.command {
        Commands::Import {
            file,
            limit,
            dry_run,
        } => run_import(&client, &config, file, limit, dry_run).await,
        Commands::Product { command } => run_product(&client, command).await,
        Commands::Category {
            command: CategoryCommands::Find { name },
        } => {
            match client.get_category_by_name(&name).await? {
                Some(id) => println!("{id}"),
                None => println!("category '{name}' not found"),
            }
            Ok(())
        }
    }
}

async fn run_import(
    client: &CatalogClient,
    config: &AppConfig,
    file: Option<PathBuf>,
    limit: Option<usize>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let path = file.or_else(|| config.source_path()).context(
        "no workbook given: pass --file or set EXCEL_FILE_NAME (and EXCEL_FILE_LOCATION)",
    )?;
    let limit = limit.unwrap_or(config.row_limit);

    let sheet = open_sheet(&path)?;
    let rows = extract_sheet(&sheet, ColumnLayout::default(), limit, &config.weight_unit);

    if dry_run {
        let rows: Vec<_> = rows.collect();
        println!(
            "dry-run: would import {} products from {}",
            rows.len(),
            path.display()
        );
        for row in &rows {
            println!(
                "  row {}: {} | {} | {} | {}",
                row.row, row.sku, row.name, row.price, row.category_path
            );
        }
        return Ok(());
    }

    tracing::info!(file = %path.display(), limit, "starting import");
    let summary = Importer::new(client, config).run(rows).await?;
    println!(
        "import complete: {} staged, {} created, {} updated, {} failed",
        summary.staged, summary.created, summary.updated, summary.failed
    );
    Ok(())
}

async fn run_product(client: &CatalogClient, command: ProductCommands) -> anyhow::Result<()> {
    match command {
        ProductCommands::Show { id } => {
            let product = client.get_product(&id).await?;
            println!("{}", serde_json::to_string_pretty(&product)?);
        }
        ProductCommands::FindSku { sku } => match client.get_product_by_sku(&sku).await? {
            Some(id) => println!("{id}"),
            None => println!("no product with SKU '{sku}' in the first 100 search results"),
        },
        ProductCommands::Resync { id } => {
            let product = client.get_product(&id).await?;
            let message = client.update_product(&id, &product.to_input()).await?;
            println!("{message}");
        }
    }
    Ok(())
}
