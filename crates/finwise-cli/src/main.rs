mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::categorize::CategorizeArgs;
use commands::credit_score::CreditScoreArgs;
use commands::ledger::MonthSummaryArgs;
use commands::risk::RisksArgs;
use commands::scoring::ScoreArgs;
use commands::tax::{ItrArgs, TaxArgs};

/// Personal finance calculations: tax regimes, health score, risk alerts
#[derive(Parser)]
#[command(
    name = "finwise",
    version,
    about = "Personal finance calculations: tax regimes, health score, risk alerts",
    long_about = "A CLI for personal finance calculations with decimal precision. \
                  Compares Old and New income-tax regimes, assesses returns, scores \
                  financial health, simulates credit scores, flags cash-flow risks and summarizes monthly \
                  transactions."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log engine decisions to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare tax under the Old and New regimes
    Tax(TaxArgs),
    /// Assess an income-tax return: liability, refund or amount payable
    Itr(ItrArgs),
    /// Calculate the 0-100 financial health score
    Score(ScoreArgs),
    /// Detect financial risk alerts
    Risks(RisksArgs),
    /// Simulate a 300-900 credit score from bureau factors
    CreditScore(CreditScoreArgs),
    /// Categorize transaction descriptions by keyword
    Categorize(CategorizeArgs),
    /// Summarize a month of transactions and run every engine on it
    MonthSummary(MonthSummaryArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(cli.verbose) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Tax(args) => commands::tax::run_tax(args),
        Commands::Itr(args) => commands::tax::run_itr(args),
        Commands::Score(args) => commands::scoring::run_score(args),
        Commands::Risks(args) => commands::risk::run_risks(args),
        Commands::CreditScore(args) => commands::credit_score::run_credit_score(args),
        Commands::Categorize(args) => commands::categorize::run_categorize(args),
        Commands::MonthSummary(args) => commands::ledger::run_month_summary(args),
        Commands::Version => {
            println!("finwise {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
