use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mealcost::cli;

/// mealcost - weekly meal plan groceries and costs
#[derive(Parser)]
#[command(name = "mealcost")]
#[command(about = "Aggregate and cost the groceries of weekly meal plans", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cost one week, or every plan in the plans directory
    Cost {
        /// Plan file to cost (defaults to all plans)
        #[arg(long)]
        week: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Categorized shopping list for a week
    Grocery {
        #[arg(long)]
        week: PathBuf,

        /// Hide ingredients already in stock
        #[arg(long)]
        missing_only: bool,

        #[arg(long)]
        json: bool,
    },
    /// Calories and dinners of a week
    Week {
        #[arg(long)]
        week: PathBuf,

        #[arg(long)]
        json: bool,
    },
    /// Spending across all costed weeks
    Spending {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealcost::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealcost::observability::init_observability(
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.observability.json,
    )?;

    let output = match cli.command {
        Commands::Cost { week, json } => cli::cost::run(&config, week.as_deref(), json),
        Commands::Grocery {
            week,
            missing_only,
            json,
        } => cli::grocery::run(&config, &week, missing_only, json),
        Commands::Week { week, json } => cli::week::run(&config, &week, json),
        Commands::Spending { json } => cli::spending::run(&config, json),
    }?;

    if !output.is_empty() {
        println!("{}", output.trim_end());
    }

    Ok(())
}
