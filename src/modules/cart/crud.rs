use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::{Collection, Database};

use crate::config::database::inserted_object_id;
use crate::error::Result;
use crate::modules::cart::model::{Cart, CartItem};
use crate::modules::cart::store::{CartStore, UnresolvedScan};

const COLLECTION_NAME: &str = "carts";

pub struct CartCrud {
    collection: Collection<Cart>,
    raw: Collection<Document>,
}

impl CartCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
            raw: db.collection(COLLECTION_NAME),
        }
    }

    /// `{ product: null }` matches both an explicit null and a missing field.
    fn unresolved_filter() -> Document {
        doc! { "items": { "$elemMatch": { "product": null } } }
    }

    pub async fn create(&self, cart: Cart) -> Result<ObjectId> {
        let result = self.collection.insert_one(cart).await?;
        inserted_object_id(&result.inserted_id, COLLECTION_NAME)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Cart>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}

#[async_trait]
impl CartStore for CartCrud {
    async fn find_unresolved(&self) -> Result<UnresolvedScan> {
        use futures::TryStreamExt;

        let cursor = self.raw.find(Self::unresolved_filter()).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(UnresolvedScan::decode(docs))
    }

    async fn replace_items(&self, cart_id: &ObjectId, items: &[CartItem]) -> Result<bool> {
        let items = bson::to_bson(items)?;
        let result = self
            .collection
            .update_one(doc! { "_id": cart_id }, doc! { "$set": { "items": items } })
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn delete_unresolved(&self, keep: &[Bson]) -> Result<u64> {
        let mut filter = Self::unresolved_filter();
        if !keep.is_empty() {
            filter.insert("_id", doc! { "$nin": keep.to_vec() });
        }
        let result = self.collection.delete_many(filter).await?;
        Ok(result.deleted_count)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> Result<u64> {
        let result = self
            .collection
            .delete_many(doc! { "user": user_id })
            .await?;
        Ok(result.deleted_count)
    }
}
