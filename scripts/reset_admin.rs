//! Resets the admin account's password and role, creating the account if it
//! does not exist yet.
//!
//! Run with: ADMIN_PASSWORD=... cargo run --bin reset_admin

use anyhow::Context;
use clap::Parser;
use gallery_admin::config::{database, logging};
use gallery_admin::modules::user::crud::{reset_admin, UserCrud};
use gallery_admin::modules::user::schema::{
    AdminOutcome, AdminSeed, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_NAME,
};
use std::process::ExitCode;
use validator::Validate;

#[derive(Parser, Debug)]
#[command(version, about = "Reset or create the admin user")]
struct Args {
    #[arg(long, env = "ADMIN_NAME", default_value = DEFAULT_ADMIN_NAME)]
    name: String,

    #[arg(long, env = "ADMIN_EMAIL", default_value = DEFAULT_ADMIN_EMAIL)]
    email: String,

    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let seed = AdminSeed {
        name: args.name,
        email: args.email,
        password: args.password,
    };
    seed.validate().context("invalid admin account details")?;

    let db = database::connect_from_env()
        .await
        .context("failed to connect to MongoDB")?;
    let users = UserCrud::new(&db);

    match reset_admin(&users, &seed)
        .await
        .context("failed to reset admin user")?
    {
        AdminOutcome::Created(_) => tracing::info!(email = %seed.email, "admin account created"),
        AdminOutcome::Updated => tracing::info!(email = %seed.email, "admin account updated"),
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
