//! Ops command line for the dealership store.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showroom_config::SupabaseConfig;
use showroom_core::{cars_to_csv, showcase_cars, NewCar};
use showroom_supabase::Store;

#[derive(Parser)]
#[command(name = "showroom")]
#[command(about = "Dealership inventory operations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the showcase vehicles into an empty store
    Seed {
        /// Insert even when the store already has cars
        #[arg(long)]
        force: bool,
    },

    /// Write the inventory as CSV
    Export {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showroom_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let supabase = SupabaseConfig::from_env()?;
    let store = Store::new(&supabase.url, &supabase.key)?;

    match cli.command {
        Commands::Seed { force } => cmd_seed(&store, force).await,
        Commands::Export { output } => cmd_export(&store, output).await,
    }
}

async fn cmd_seed(store: &Store, force: bool) -> Result<()> {
    let existing = store.list_cars().await?;
    if !existing.is_empty() && !force {
        bail!(
            "store already has {} cars; run with --force to seed anyway",
            existing.len()
        );
    }

    let mut inserted = 0;
    for car in showcase_cars() {
        let row = NewCar {
            make: car.make,
            model: car.model,
            year: car.year,
            price: car.price,
            mileage: car.mileage,
            fuel_type: car.fuel_type,
            transmission: car.transmission,
            description: car.description,
            image_url: car.image_url,
        };
        let created = store.create_car(&row).await?;
        tracing::info!("seeded {} {} ({})", created.make, created.model, created.id);
        inserted += 1;
    }

    println!("seeded {inserted} cars");
    Ok(())
}

async fn cmd_export(store: &Store, output: Option<PathBuf>) -> Result<()> {
    let cars = store.list_cars().await?;
    let bytes = cars_to_csv(&cars)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &bytes)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("wrote {} cars to {}", cars.len(), path.display());
        }
        None => {
            std::io::stdout().write_all(&bytes)?;
        }
    }
    Ok(())
}
