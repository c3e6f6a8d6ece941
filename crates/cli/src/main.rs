use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use clientbook_clients::Client;
use clientbook_core::ClientId;
use clientbook_products::Product;

mod commands;

#[derive(Parser)]
#[command(
    name = "clientbook",
    version,
    about = "Sum and reconcile client products from JSON files",
    long_about = "clientbook runs the client business operations against an in-memory \
                  store seeded from JSON files and prints the results as JSON."
)]
struct Cli {
    /// Currency for sums over no products (overrides CLIENTBOOK_DEFAULT_CURRENCY)
    #[arg(long, global = true)]
    currency: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sum the amounts of a JSON array of products
    Sum {
        /// File holding a JSON array of products
        products: PathBuf,
    },

    /// Reconcile a client's current products against a desired list
    Reconcile {
        /// Client the products belong to
        #[arg(long, default_value_t = 1)]
        client: i64,
        /// File holding the currently persisted products
        #[arg(long)]
        current: PathBuf,
        /// File holding the desired products
        #[arg(long)]
        desired: PathBuf,
        /// Only print the plan, do not apply it
        #[arg(long)]
        dry_run: bool,
    },

    /// Compute and save a client's product amount
    Total {
        /// File holding a JSON client with its products
        client: PathBuf,
    },
}

fn main() -> Result<()> {
    clientbook_observability::init();

    let cli = Cli::parse();

    let config = commands::load_config(cli.currency.as_deref())?;

    let output = match cli.command {
        Commands::Sum { products } => {
            let products: Vec<Product> = commands::read_json(&products)?;
            serde_json::to_value(commands::sum(&products, config)?)?
        }
        Commands::Reconcile {
            client,
            current,
            desired,
            dry_run,
        } => {
            let current: Vec<Product> = commands::read_json(&current)?;
            let desired: Vec<Product> = commands::read_json(&desired)?;
            let report =
                commands::reconcile(ClientId::new(client), current, &desired, dry_run, config)?;
            serde_json::to_value(report)?
        }
        Commands::Total { client } => {
            let client: Client = commands::read_json(&client)?;
            serde_json::to_value(commands::total(client, config)?)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
