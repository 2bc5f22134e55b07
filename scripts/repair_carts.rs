//! Moves cart items from `galleryItem` to `product`, then deletes carts that
//! still hold an item with no product reference.
//!
//! Run with: cargo run --bin repair_carts [-- --dry-run]

use anyhow::Context;
use clap::Parser;
use gallery_admin::config::{database, logging};
use gallery_admin::modules::cart::crud::CartCrud;
use gallery_admin::modules::cart::repair::{preview_repair, repair_all_carts};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Repair legacy cart items")]
struct Args {
    /// Report what would change without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Print the final report as JSON on stdout
    #[arg(long)]
    json: bool,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let db = database::connect_from_env()
        .await
        .context("failed to connect to MongoDB")?;
    let carts = CartCrud::new(&db);

    let report = if args.dry_run {
        tracing::info!("dry run, no documents will be modified");
        preview_repair(&carts).await.context("failed to plan cart repair")?
    } else {
        repair_all_carts(&carts).await.context("cart repair aborted")?
    };

    if report.scanned == 0 {
        tracing::info!("no carts need repair");
    }
    if args.json {
        println!("{}", serde_json::to_string(&report)?);
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
