use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    /// bcrypt hash, never the plaintext.
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_at: DateTime<Utc>,
    #[serde(
        rename = "updatedAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub updated_at: DateTime<Utc>,
}

fn default_role() -> String {
    ROLE_USER.to_string()
}

impl User {
    pub fn new_admin(name: String, email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name,
            email: normalize_email(email),
            password: password_hash,
            role: ROLE_ADMIN.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
