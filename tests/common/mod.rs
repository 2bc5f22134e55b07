//! Shared fixtures: in-memory stores and a throwaway MongoDB database.

#![allow(dead_code)]

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use gallery_admin::error::{AdminError, Result};
use gallery_admin::modules::cart::model::{Cart, CartItem, ProductRef};
use gallery_admin::modules::cart::store::{CartStore, UnresolvedScan};
use gallery_admin::modules::user::model::User;
use gallery_admin::modules::user::store::UserStore;
use mongodb::Database;
use std::sync::Mutex;

/// Holds raw cart documents so malformed carts can be stored too.
#[derive(Default)]
pub struct MemoryCartStore {
    docs: Mutex<Vec<Document>>,
    fail_writes: bool,
    fail_sweep: bool,
    vanish_before_write: bool,
    writes: Mutex<usize>,
}

/// Mirrors `{ items: { $elemMatch: { product: null } } }`: only embedded
/// documents are tested, and null counts as missing.
fn is_unresolved(doc: &Document) -> bool {
    let Ok(items) = doc.get_array("items") else {
        return false;
    };
    items.iter().any(|item| match item {
        Bson::Document(item) => matches!(item.get("product"), None | Some(Bson::Null)),
        _ => false,
    })
}

impl MemoryCartStore {
    pub fn with_carts(carts: Vec<Cart>) -> Self {
        let docs = carts
            .into_iter()
            .map(|mut cart| {
                cart.id.get_or_insert_with(ObjectId::new);
                bson::to_document(&cart).unwrap()
            })
            .collect();
        Self::with_documents(docs)
    }

    pub fn with_documents(docs: Vec<Document>) -> Self {
        Self {
            docs: Mutex::new(docs),
            ..Self::default()
        }
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn failing_sweep(mut self) -> Self {
        self.fail_sweep = true;
        self
    }

    /// Every cart is deleted by someone else right before the first rewrite.
    pub fn vanishing_before_write(mut self) -> Self {
        self.vanish_before_write = true;
        self
    }

    pub fn documents(&self) -> Vec<Document> {
        self.docs.lock().unwrap().clone()
    }

    pub fn carts(&self) -> Vec<Cart> {
        self.documents()
            .into_iter()
            .map(|doc| bson::from_document(doc).unwrap())
            .collect()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn find_unresolved(&self) -> Result<UnresolvedScan> {
        let matched: Vec<Document> = self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|doc| is_unresolved(doc))
            .cloned()
            .collect();
        Ok(UnresolvedScan::decode(matched))
    }

    async fn replace_items(&self, cart_id: &ObjectId, items: &[CartItem]) -> Result<bool> {
        if self.fail_writes {
            return Err(AdminError::NotFound("simulated write failure".to_string()));
        }
        let mut docs = self.docs.lock().unwrap();
        if self.vanish_before_write {
            docs.clear();
        }
        *self.writes.lock().unwrap() += 1;
        match docs
            .iter_mut()
            .find(|doc| doc.get_object_id("_id").ok() == Some(*cart_id))
        {
            Some(doc) => {
                doc.insert("items", bson::to_bson(items)?);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_unresolved(&self, keep: &[Bson]) -> Result<u64> {
        if self.fail_sweep {
            return Err(AdminError::NotFound("simulated sweep failure".to_string()));
        }
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|doc| {
            let kept = doc.get("_id").is_some_and(|id| keep.contains(id));
            kept || !is_unresolved(doc)
        });
        Ok((before - docs.len()) as u64)
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut docs = self.docs.lock().unwrap();
        let deleted = docs.len() as u64;
        docs.clear();
        Ok(deleted)
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> Result<u64> {
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|doc| doc.get_object_id("user").ok() != Some(*user_id));
        Ok((before - docs.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    vanish_on_update: bool,
}

impl MemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Self {
        let users = users
            .into_iter()
            .map(|mut user| {
                user.id.get_or_insert_with(ObjectId::new);
                user
            })
            .collect();
        Self {
            users: Mutex::new(users),
            ..Self::default()
        }
    }

    /// The account is deleted by someone else right before the update lands.
    pub fn vanishing_on_update(mut self) -> Self {
        self.vanish_on_update = true;
        self
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = gallery_admin::modules::user::model::normalize_email(email);
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn create(&self, mut user: User) -> Result<ObjectId> {
        let id = ObjectId::new();
        user.id = Some(id);
        self.users.lock().unwrap().push(user);
        Ok(id)
    }

    async fn set_admin_credentials(
        &self,
        id: &ObjectId,
        name: &str,
        password_hash: &str,
    ) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        if self.vanish_on_update {
            users.clear();
        }
        match users.iter_mut().find(|user| user.id.as_ref() == Some(id)) {
            Some(user) => {
                user.name = name.to_string();
                user.password = password_hash.to_string();
                user.role = "admin".to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub fn legacy_item(reference: &str, quantity: i32, price: f64) -> CartItem {
    CartItem::new(ProductRef::Legacy(Bson::String(reference.to_string())), quantity, price)
}

pub fn current_item(reference: &str, quantity: i32, price: f64) -> CartItem {
    CartItem::new(ProductRef::Current(Bson::String(reference.to_string())), quantity, price)
}

pub fn broken_item(quantity: i32, price: f64) -> CartItem {
    CartItem::new(ProductRef::Missing, quantity, price)
}

pub fn cart_with(items: Vec<CartItem>) -> Cart {
    let mut cart = Cart::new(ObjectId::new(), items);
    cart.id = Some(ObjectId::new());
    cart
}

/// Connects to `MONGODB_URI` with a fresh database, or returns None when the
/// variable is unset so the calling test can skip.
pub async fn mongo_or_skip() -> Option<Database> {
    dotenvy::dotenv().ok();
    let uri = match std::env::var("MONGODB_URI") {
        Ok(uri) => uri,
        Err(_) => {
            eprintln!("Skipping MongoDB test (MONGODB_URI not set)");
            return None;
        }
    };

    let client = mongodb::Client::with_uri_str(&uri)
        .await
        .expect("invalid MONGODB_URI");
    let name = format!("gallery_admin_test_{}", uuid::Uuid::new_v4().simple());
    Some(client.database(&name))
}
