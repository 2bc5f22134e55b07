use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::Utc;
use mongodb::{Collection, Database};
use validator::Validate;

use crate::config::database::inserted_object_id;
use crate::error::{AdminError, Result};
use crate::modules::user::model::{normalize_email, User, ROLE_ADMIN};
use crate::modules::user::schema::{AdminOutcome, AdminSeed};
use crate::modules::user::store::UserStore;
use crate::services::password::hash_password;

const COLLECTION_NAME: &str = "users";

pub struct UserCrud {
    collection: Collection<User>,
}

impl UserCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    pub async fn delete_by_email(&self, email: &str) -> Result<u64> {
        let email = normalize_email(email);
        let result = self.collection.delete_many(doc! { "email": email }).await?;
        Ok(result.deleted_count)
    }
}

#[async_trait]
impl UserStore for UserCrud {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = normalize_email(email);
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn create(&self, user: User) -> Result<ObjectId> {
        let result = self.collection.insert_one(user).await?;
        inserted_object_id(&result.inserted_id, COLLECTION_NAME)
    }

    async fn set_admin_credentials(
        &self,
        id: &ObjectId,
        name: &str,
        password_hash: &str,
    ) -> Result<bool> {
        let now = bson::DateTime::from_chrono(Utc::now());
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "name": name,
                        "password": password_hash,
                        "role": ROLE_ADMIN,
                        "updatedAt": now,
                    }
                },
            )
            .await?;

        Ok(result.matched_count > 0)
    }
}

/// Resets the admin account named by `seed.email`, creating it if absent.
///
/// An account that disappears between lookup and update is created afresh.
pub async fn reset_admin<U: UserStore + ?Sized>(users: &U, seed: &AdminSeed) -> Result<AdminOutcome> {
    seed.validate()?;
    let password_hash = hash_password(&seed.password)?;

    if let Some(existing) = users.find_by_email(&seed.email).await? {
        let id = existing
            .id
            .ok_or_else(|| AdminError::NotFound(format!("_id of user {}", existing.email)))?;
        if users
            .set_admin_credentials(&id, &seed.name, &password_hash)
            .await?
        {
            tracing::info!(email = %existing.email, was_admin = existing.is_admin(), "admin credentials reset");
            return Ok(AdminOutcome::Updated);
        }
        tracing::warn!(email = %existing.email, user_id = %id, "user vanished before update, creating it");
    }

    let user = User::new_admin(seed.name.clone(), &seed.email, password_hash);
    let id = users.create(user).await?;
    tracing::info!(email = %normalize_email(&seed.email), user_id = %id, "admin user created");

    Ok(AdminOutcome::Created(id))
}
