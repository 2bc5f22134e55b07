use crate::error::{AdminError, Result};
use crate::modules::cart::store::CartStore;
use crate::modules::user::store::UserStore;

pub async fn delete_all_carts<S: CartStore + ?Sized>(store: &S) -> Result<u64> {
    let deleted = store.delete_all().await?;
    tracing::info!(deleted, "all carts deleted");
    Ok(deleted)
}

/// Deletes the cart of the user registered under `email`. Zero deleted means
/// the user exists but had no cart.
pub async fn delete_user_cart<U: UserStore + ?Sized, S: CartStore + ?Sized>(
    users: &U,
    store: &S,
    email: &str,
) -> Result<u64> {
    let user = users
        .find_by_email(email)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("user with email {email}")))?;
    let user_id = user
        .id
        .ok_or_else(|| AdminError::NotFound(format!("_id of user {email}")))?;

    let deleted = store.delete_by_user(&user_id).await?;
    if deleted == 0 {
        tracing::info!(%email, %user_id, "user has no cart");
    } else {
        tracing::info!(%email, %user_id, deleted, "user cart deleted");
    }

    Ok(deleted)
}
