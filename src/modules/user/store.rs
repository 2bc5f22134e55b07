use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::error::Result;
use crate::modules::user::model::User;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Lookup is case-insensitive; stored emails are lower-case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn create(&self, user: User) -> Result<ObjectId>;

    /// Points an existing account at new credentials and promotes it to
    /// admin. Returns false when no user with that id exists.
    async fn set_admin_credentials(
        &self,
        id: &ObjectId,
        name: &str,
        password_hash: &str,
    ) -> Result<bool>;
}
