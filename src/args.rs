//! These structs provide the CLI interface for the retail CLI.

use crate::summary::DEFAULT_TOP_PRODUCTS;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// retail: a command-line tool for analyzing a transactional retail CSV export.
///
/// The program reads the export (ISO-8859-1 encoded, with at least the columns
/// InvoiceNo, StockCode, Description, Quantity, InvoiceDate, UnitPrice,
/// CustomerID and Country), drops rows that fail the cleaning rules, and
/// prints aggregate revenue views over what remains. Nothing is persisted;
/// every command recomputes from the file.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print scalar KPIs: total revenue and distinct invoice, country and
    /// customer counts.
    Summary,
    /// Print revenue grouped by country, highest revenue first.
    Countries,
    /// Print the top products by revenue, highest revenue first.
    Products(ProductsArgs),
    /// Print revenue grouped by calendar month, earliest month first.
    ///
    /// Rows whose invoice date did not match the expected format carry no
    /// month label and are left out of this view.
    Months,
    /// Print the first rows of the cleaned table.
    Preview(PreviewArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate
    /// for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The path to the retail CSV export.
    #[arg(long, short = 'f', env = "RETAIL_DATA")]
    file: PathBuf,
}

impl Common {
    pub fn new(log_level: LevelFilter, file: PathBuf) -> Self {
        Self { log_level, file }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Args for the `retail products` command.
#[derive(Debug, Parser, Clone)]
pub struct ProductsArgs {
    /// How many products to include.
    #[arg(long, default_value_t = DEFAULT_TOP_PRODUCTS)]
    top: usize,
}

impl ProductsArgs {
    pub fn new(top: usize) -> Self {
        Self { top }
    }

    pub fn top(&self) -> usize {
        self.top
    }
}

/// Args for the `retail preview` command.
#[derive(Debug, Parser, Clone)]
pub struct PreviewArgs {
    /// How many cleaned rows to show.
    #[arg(long, default_value_t = 20)]
    rows: usize,
}

impl PreviewArgs {
    pub fn new(rows: usize) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_countries() {
        let args = Args::try_parse_from(["retail", "--file", "data.csv", "countries"]).unwrap();
        assert!(matches!(args.command(), Command::Countries));
        assert_eq!(args.common().file(), Path::new("data.csv"));
    }

    #[test]
    fn test_parse_products_default_top() {
        let args = Args::try_parse_from(["retail", "-f", "data.csv", "products"]).unwrap();
        match args.command() {
            Command::Products(products_args) => {
                assert_eq!(products_args.top(), DEFAULT_TOP_PRODUCTS)
            }
            other => panic!("expected products, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_products_custom_top() {
        let args =
            Args::try_parse_from(["retail", "-f", "data.csv", "products", "--top", "5"]).unwrap();
        match args.command() {
            Command::Products(products_args) => assert_eq!(products_args.top(), 5),
            other => panic!("expected products, got {other:?}"),
        }
    }

    #[test]
    fn test_file_is_required() {
        assert!(Args::try_parse_from(["retail", "summary"]).is_err());
    }

    #[test]
    fn test_log_level_parses() {
        let args = Args::try_parse_from([
            "retail",
            "--log-level",
            "debug",
            "--file",
            "data.csv",
            "months",
        ])
        .unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
    }
}
