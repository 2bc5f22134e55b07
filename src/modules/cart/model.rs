use bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};

pub const PRODUCT_FIELD: &str = "product";
pub const LEGACY_PRODUCT_FIELD: &str = "galleryItem";

/// Where a cart item points at the thing being bought.
///
/// Stored documents carry the reference under `product` (current) or
/// `galleryItem` (legacy). A BSON `null` counts as absent, and `product`
/// takes precedence when both are set.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductRef {
    Current(Bson),
    Legacy(Bson),
    Missing,
}

impl ProductRef {
    fn from_fields(product: Option<Bson>, legacy: Option<Bson>) -> Self {
        match (present(product), present(legacy)) {
            (Some(product), _) => ProductRef::Current(product),
            (None, Some(legacy)) => ProductRef::Legacy(legacy),
            (None, None) => ProductRef::Missing,
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, ProductRef::Current(_))
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, ProductRef::Legacy(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ProductRef::Missing)
    }
}

fn present(value: Option<Bson>) -> Option<Bson> {
    value.filter(|v| !matches!(v, Bson::Null | Bson::Undefined))
}

/// One line of a cart.
///
/// Only the reference field is interpreted. `quantity`, `price` and anything
/// else stay in `fields` as stored, so a rewrite writes them back with the
/// same BSON types and values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Document", into = "Document")]
pub struct CartItem {
    pub id: Option<Bson>,
    pub product: ProductRef,
    pub fields: Document,
}

impl CartItem {
    pub fn new(product: ProductRef, quantity: i32, price: f64) -> Self {
        Self {
            id: Some(Bson::ObjectId(ObjectId::new())),
            product,
            fields: bson::doc! { "quantity": quantity, "price": price },
        }
    }

    pub fn quantity(&self) -> Option<&Bson> {
        self.fields.get("quantity")
    }

    pub fn price(&self) -> Option<&Bson> {
        self.fields.get("price")
    }
}

impl From<Document> for CartItem {
    fn from(mut doc: Document) -> Self {
        let id = doc.remove("_id");
        let product = ProductRef::from_fields(
            doc.remove(PRODUCT_FIELD),
            doc.remove(LEGACY_PRODUCT_FIELD),
        );

        Self {
            id,
            product,
            fields: doc,
        }
    }
}

impl From<CartItem> for Document {
    fn from(item: CartItem) -> Self {
        let mut doc = Document::new();
        if let Some(id) = item.id {
            doc.insert("_id", id);
        }
        match item.product {
            ProductRef::Current(r) => {
                doc.insert(PRODUCT_FIELD, r);
            }
            ProductRef::Legacy(r) => {
                doc.insert(LEGACY_PRODUCT_FIELD, r);
            }
            ProductRef::Missing => {}
        }
        for (key, value) in item.fields {
            doc.insert(key, value);
        }
        doc
    }
}

/// A stored cart. `user` is kept as raw BSON: the repair never reads it and
/// older documents do not always hold an ObjectId there.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Cart {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub user: Option<Bson>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<bson::DateTime>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<bson::DateTime>,
}

impl Cart {
    pub fn new(user: ObjectId, items: Vec<CartItem>) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: None,
            user: Some(Bson::ObjectId(user)),
            items,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// True when some item has no usable `product` reference yet.
    pub fn has_unresolved_items(&self) -> bool {
        self.items.iter().any(|item| !item.product.is_current())
    }
}
