use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("failed to encode document: {0}")]
    Serialization(#[from] bson::ser::Error),
    #[error("invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("insert into {collection} returned a non-ObjectId _id: {id}")]
    UnexpectedId { collection: String, id: String },
}

pub type Result<T> = std::result::Result<T, AdminError>;
