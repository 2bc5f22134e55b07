//! Persistence seam for carts.

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};

use crate::error::Result;
use crate::modules::cart::model::{Cart, CartItem};

/// Carts matched by the unresolved-item predicate.
///
/// `skipped` holds the `_id` of every matched document that could not be
/// decoded as a cart. The sweep must leave those alone: their legacy items
/// were never rewritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnresolvedScan {
    pub carts: Vec<Cart>,
    pub skipped: Vec<Bson>,
}

impl UnresolvedScan {
    /// Decodes each document on its own so one malformed cart does not hide
    /// the rest.
    pub fn decode(docs: impl IntoIterator<Item = Document>) -> Self {
        let mut scan = Self::default();
        for doc in docs {
            let id = doc.get("_id").cloned();
            match bson::from_document::<Cart>(doc) {
                Ok(cart) => scan.carts.push(cart),
                Err(e) => {
                    tracing::warn!(cart_id = ?id, error = %e, "skipping undecodable cart");
                    scan.skipped.extend(id);
                }
            }
        }
        scan
    }
}

#[async_trait]
pub trait CartStore: Send + Sync {
    /// Carts holding at least one item without a `product` reference.
    /// Every item of a cart is considered, not only the first.
    async fn find_unresolved(&self) -> Result<UnresolvedScan>;

    /// Replace the whole `items` array of one cart in a single write.
    /// Returns false when no cart with that id exists.
    async fn replace_items(&self, cart_id: &ObjectId, items: &[CartItem]) -> Result<bool>;

    /// Delete every cart that still has an item without a `product`
    /// reference, except those whose `_id` is in `keep`.
    async fn delete_unresolved(&self, keep: &[Bson]) -> Result<u64>;

    async fn delete_all(&self) -> Result<u64>;

    async fn delete_by_user(&self, user_id: &ObjectId) -> Result<u64>;
}
