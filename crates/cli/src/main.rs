mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};

use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "foodflow", about = "Order pricing and fulfillment tracking")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price a cart: subtotal, delivery fee, taxes, total.
    Quote {
        /// Line item as NAME:PRICE:QTY (repeatable).
        #[arg(long = "item", required = true)]
        items: Vec<String>,
        #[arg(long)]
        promo: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show the four-step tracker for a status.
    Track {
        status: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the status that follows the given one.
    Advance { status: String },
}

fn main() -> Result<()> {
    foodflow_observability::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Quote { items, promo, json } => {
            let config = AppConfig::from_env()?;
            let quote = commands::quote(&config, &items, promo.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                print!("{}", commands::render_quote(&quote)?);
            }
        }
        Command::Track { status, json } => {
            let tracker = commands::track(&status)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tracker)?);
            } else {
                println!("{}", commands::render_tracker(&tracker));
            }
        }
        Command::Advance { status } => {
            let next = commands::advance(&status)?;
            println!("{}", next.label());
        }
    }

    Ok(())
}
