use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kosha", about = "Personal-finance import and insight toolkit", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a CSV/Excel/PDF statement into draft expenses.
    Import {
        file: PathBuf,
        /// Emit the full report as JSON instead of a table.
        #[arg(long)]
        json: bool,
        /// Import-day override (YYYY-MM-DD) used as the date fallback.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// TOML file with category rule overrides.
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Write the starter CSV template.
    Template {
        #[arg(default_value = "expense_template.csv")]
        out: PathBuf,
    },
    /// Month snapshot for a profile plus an imported statement: savings
    /// capacity, monthly report and smart warnings.
    Report {
        /// TOML file describing the user profile.
        #[arg(long)]
        profile: PathBuf,
        file: PathBuf,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Import { file, json, date, rules } => {
            commands::import(&file, json, date, rules.as_deref()).await
        }
        Command::Template { out } => commands::template(&out),
        Command::Report { profile, file, date } => {
            commands::report(&profile, &file, date).await
        }
    }
}
