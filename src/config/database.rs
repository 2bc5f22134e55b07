use bson::{doc, oid::ObjectId, Bson};
use mongodb::{Client, Database};
use std::env;

use crate::error::{AdminError, Result};

const DEFAULT_DATABASE: &str = "artgallery";

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let uri = env::var("MONGODB_URI")
            .map_err(|_| AdminError::Config("MONGODB_URI must be set".to_string()))?;
        let database =
            env::var("MONGODB_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        Ok(Self { uri, database })
    }
}

/// Opens a client and pings the server so a bad URI or unreachable host
/// fails here instead of on the first query.
pub async fn connect(config: &DatabaseConfig) -> Result<Database> {
    let client = Client::with_uri_str(&config.uri).await?;
    let db = client.database(&config.database);

    db.run_command(doc! { "ping": 1 }).await?;
    tracing::info!(database = %config.database, "connected to MongoDB");

    Ok(db)
}

pub async fn connect_from_env() -> Result<Database> {
    let config = DatabaseConfig::from_env()?;
    connect(&config).await
}

/// The `_id` MongoDB reports for an insert. Every collection this crate
/// writes to is keyed by ObjectId.
pub fn inserted_object_id(inserted: &Bson, collection: &str) -> Result<ObjectId> {
    inserted
        .as_object_id()
        .ok_or_else(|| AdminError::UnexpectedId {
            collection: collection.to_string(),
            id: inserted.to_string(),
        })
}
