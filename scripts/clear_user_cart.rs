//! Deletes the cart of a single user.
//!
//! Run with: cargo run --bin clear_user_cart -- <EMAIL>

use anyhow::Context;
use clap::Parser;
use gallery_admin::config::{database, logging};
use gallery_admin::modules::cart::crud::CartCrud;
use gallery_admin::modules::cart::maintenance::delete_user_cart;
use gallery_admin::modules::user::crud::UserCrud;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Delete one user's shopping cart")]
struct Args {
    /// Email address of the cart owner
    email: String,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let db = database::connect_from_env()
        .await
        .context("failed to connect to MongoDB")?;
    let users = UserCrud::new(&db);
    let carts = CartCrud::new(&db);

    delete_user_cart(&users, &carts, &args.email)
        .await
        .with_context(|| format!("failed to clear cart of {}", args.email))?;

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
