use serde::Deserialize;
use validator::Validate;

pub const DEFAULT_ADMIN_NAME: &str = "Admin";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@artgallery.com";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminSeed {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdminOutcome {
    Created(bson::oid::ObjectId),
    Updated,
}
