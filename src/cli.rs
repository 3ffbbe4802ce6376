//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_source_adapter::CsvSourceAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::sqlite_store_adapter::SqliteStoreAdapter;
use crate::domain::analyzer::Analyzer;
use crate::domain::error::StocklensError;
use crate::domain::loader::Loader;

#[derive(Parser, Debug)]
#[command(name = "stocklens", about = "Price-history ingestion and indicator analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load CSV price-history files, one instrument table per file
    Load {
        #[arg(short, long)]
        config: PathBuf,
        /// Source files; each replaces the table named after it
        files: Vec<PathBuf>,
    },
    /// List loaded instruments
    List {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Simple moving average of close over a trailing window
    Sma {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        instrument: String,
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,
    },
    /// Exponential moving average of close over a trailing window
    Ema {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        instrument: String,
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,
    },
    /// Population standard deviation of close over a trailing window
    Volatility {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        instrument: String,
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,
    },
}

#[derive(Debug, Clone, Copy)]
enum IndicatorOp {
    Sma,
    Ema,
    Volatility,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Load { config, files } => run_load(&config, &files),
        Command::List { config } => run_list(&config),
        Command::Sma {
            config,
            instrument,
            days,
        } => run_indicator(&config, &instrument, days, IndicatorOp::Sma),
        Command::Ema {
            config,
            instrument,
            days,
        } => run_indicator(&config, &instrument, days, IndicatorOp::Ema),
        Command::Volatility {
            config,
            instrument,
            days,
        } => run_indicator(&config, &instrument, days, IndicatorOp::Volatility),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StocklensError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn open_store(config_path: &PathBuf) -> Result<SqliteStoreAdapter, ExitCode> {
    let config = load_config(config_path)?;
    SqliteStoreAdapter::from_config(&config).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn run_load(config_path: &PathBuf, files: &[PathBuf]) -> ExitCode {
    if files.is_empty() {
        eprintln!("error: no source files given");
        return ExitCode::from(1);
    }

    let store = match open_store(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let source = CsvSourceAdapter::new();
    let loader = Loader::new(&store, &source);

    for file in files {
        match loader.load_instrument(file) {
            Ok(summary) => {
                println!("{}: {} rows loaded", summary.table, summary.rows_inserted);
            }
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_list(config_path: &PathBuf) -> ExitCode {
    let store = match open_store(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let analyzer = Analyzer::new(&store);

    let instruments = match analyzer.list_instruments() {
        Ok(i) => i,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if instruments.is_empty() {
        eprintln!("No instruments loaded");
    } else {
        for name in &instruments {
            println!("{name}");
        }
        eprintln!("{} instruments", instruments.len());
    }
    ExitCode::SUCCESS
}

fn run_indicator(
    config_path: &PathBuf,
    instrument: &str,
    days: u32,
    op: IndicatorOp,
) -> ExitCode {
    let store = match open_store(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let analyzer = Analyzer::new(&store);

    let result = match op {
        IndicatorOp::Sma => analyzer.compute_sma(instrument, days),
        IndicatorOp::Ema => analyzer.compute_ema(instrument, days),
        IndicatorOp::Volatility => analyzer.compute_volatility(instrument, days),
    };

    match result {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
