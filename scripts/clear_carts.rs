//! Deletes every shopping cart.
//!
//! Run with: cargo run --bin clear_carts -- --yes

use anyhow::Context;
use clap::Parser;
use gallery_admin::config::{database, logging};
use gallery_admin::modules::cart::crud::CartCrud;
use gallery_admin::modules::cart::maintenance::delete_all_carts;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Delete all shopping carts")]
struct Args {
    /// Confirm the deletion
    #[arg(long)]
    yes: bool,
}

async fn run(args: Args) -> anyhow::Result<()> {
    if !args.yes {
        anyhow::bail!("refusing to delete every cart without --yes");
    }

    let db = database::connect_from_env()
        .await
        .context("failed to connect to MongoDB")?;
    let carts = CartCrud::new(&db);

    let deleted = delete_all_carts(&carts)
        .await
        .context("failed to delete carts")?;
    if deleted == 0 {
        tracing::info!("no carts found");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
