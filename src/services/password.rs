use bcrypt::DEFAULT_COST;

use crate::error::Result;

/// Hashes with bcrypt so the storefront's login check accepts the result.
pub fn hash_password(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, DEFAULT_COST)?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(password, hash)?)
}
