//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_export_adapter::CsvExportAdapter;
use crate::adapters::csv_price_adapter::CsvPriceAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::calculator::IndexCalculator;
use crate::domain::config_validation::{
    resolve_dates, resolve_output_path, resolve_prices_path,
};
use crate::domain::error::IndexError;
use crate::ports::price_port::PricePort;

#[derive(Parser, Debug)]
#[command(name = "capindex", about = "Market-cap weighted equity index calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Calculate the index level series and export it
    Calculate {
        #[arg(short, long)]
        config: PathBuf,
        /// Override [index] start_date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Override [index] end_date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<NaiveDate>,
        /// Override [index] output_csv
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override [data] prices_csv
        #[arg(long)]
        prices: Option<PathBuf>,
        /// Validate config and input without computing or writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the input's date range, stock universe and month coverage
    Info {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        prices: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Calculate {
            config,
            start_date,
            end_date,
            output,
            prices,
            dry_run,
        } => run_calculate(
            &config,
            start_date,
            end_date,
            output.as_ref(),
            prices.as_ref(),
            dry_run,
        ),
        Command::Info { config, prices } => run_info(config.as_ref(), prices.as_ref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = IndexError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_calculate(
    config_path: &PathBuf,
    start_override: Option<NaiveDate>,
    end_override: Option<NaiveDate>,
    output_override: Option<&PathBuf>,
    prices_override: Option<&PathBuf>,
    dry_run: bool,
) -> ExitCode {
    // Stage 1: Load and resolve config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let prices_path = match resolve_prices_path(&adapter, prices_override) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let (start_date, end_date) = match resolve_dates(&adapter, start_override, end_override) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let output_path = match resolve_output_path(&adapter, output_override) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 2: Fetch the price table
    eprintln!("Reading prices from {}", prices_path.display());
    let data_port = CsvPriceAdapter::new(prices_path);
    let mut calculator = match IndexCalculator::from_port(&data_port) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let table = calculator.table();
    eprintln!(
        "  {} rows, {} stocks, {} business-day month(s)",
        table.rows().len(),
        table.stocks().len(),
        table.business_month_count(),
    );

    if dry_run {
        eprintln!("Dry run complete: configuration and input are readable");
        return ExitCode::SUCCESS;
    }

    // Stage 3: Calculate
    eprintln!("Calculating index level: {} to {}", start_date, end_date);
    let (first, last, len) = match calculator.calculate(start_date, end_date) {
        Ok(series) => {
            let first = series.rows[0].clone();
            let last = series.rows[series.rows.len() - 1].clone();
            (first, last, series.len())
        }
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "  {} business days, {} ({:.2}) to {} ({:.2})",
        len, first.date, first.index_level, last.date, last.index_level,
    );

    // Stage 4: Export
    let output = output_path.display().to_string();
    if let Err(e) = calculator.export(&CsvExportAdapter, &output) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("Index level series written to: {}", output);
    ExitCode::SUCCESS
}

fn run_info(config_path: Option<&PathBuf>, prices_override: Option<&PathBuf>) -> ExitCode {
    let prices_path = match (prices_override, config_path) {
        (Some(p), _) => p.clone(),
        (None, Some(cfg)) => {
            let adapter = match load_config(cfg) {
                Ok(a) => a,
                Err(code) => return code,
            };
            match resolve_prices_path(&adapter, None) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            }
        }
        (None, None) => {
            eprintln!("error: --config or --prices is required for info");
            return ExitCode::from(2);
        }
    };

    let data_port = CsvPriceAdapter::new(prices_path.clone());
    let table = match data_port.fetch_prices() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match table.date_range() {
        Some((min_date, max_date, count)) => {
            println!(
                "{}: {} rows, {} to {}",
                prices_path.display(),
                count,
                min_date,
                max_date
            );
            println!(
                "business-day months: {}",
                table.business_month_count()
            );
            for stock in table.stocks() {
                println!("{}", stock);
            }
        }
        None => {
            eprintln!("{}: no data found", prices_path.display());
        }
    }
    ExitCode::SUCCESS
}
