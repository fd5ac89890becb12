use clap::Parser;
use retail_report::args::{Args, Command};
use retail_report::{commands, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let file = args.common().file();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Summary => commands::summary(file)?.print(),
        Command::Countries => commands::countries(file)?.print(),
        Command::Products(products_args) => {
            commands::products(file, products_args.top())?.print()
        }
        Command::Months => commands::months(file)?.print(),
        Command::Preview(preview_args) => commands::preview(file, preview_args.rows())?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "retail_report={},{}={}",
                level,
                env!("CARGO_CRATE_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
