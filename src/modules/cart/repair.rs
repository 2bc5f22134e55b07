//! Migration of cart items from the legacy `galleryItem` field to `product`.
//!
//! The pass runs in two phases. Phase 1 rewrites every cart holding legacy
//! items so those items carry `product`. Phase 2 deletes every cart that still
//! has an item without `product`: such an item never had a reference to
//! recover. Deletion is per cart, so a cart loses its repaired items too when
//! one sibling is unrecoverable.

use bson::oid::ObjectId;
use serde::Serialize;

use crate::error::Result;
use crate::modules::cart::model::{Cart, CartItem, ProductRef};
use crate::modules::cart::store::{CartStore, UnresolvedScan};

/// Moves a legacy reference to `product`. Anything else comes back unchanged,
/// which makes the function idempotent.
pub fn repair_item(item: CartItem) -> CartItem {
    match item.product {
        ProductRef::Legacy(reference) => CartItem {
            product: ProductRef::Current(reference),
            ..item
        },
        _ => item,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartRewrite {
    pub cart_id: ObjectId,
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairPlan {
    pub scanned: usize,
    pub rewrites: Vec<CartRewrite>,
    pub deletions: Vec<ObjectId>,
}

impl RepairPlan {
    pub fn is_empty(&self) -> bool {
        self.rewrites.is_empty() && self.deletions.is_empty()
    }
}

/// Decides what the pass will do without touching storage.
///
/// Carts without an id cannot be addressed and are skipped.
pub fn plan_repair(carts: Vec<Cart>) -> RepairPlan {
    let mut plan = RepairPlan {
        scanned: carts.len(),
        ..RepairPlan::default()
    };

    for cart in carts {
        let Some(cart_id) = cart.id else {
            tracing::warn!("skipping cart without _id");
            continue;
        };

        let changed = cart.items.iter().any(|item| item.product.is_legacy());
        let items: Vec<CartItem> = cart.items.into_iter().map(repair_item).collect();

        if items.iter().any(|item| item.product.is_missing()) {
            plan.deletions.push(cart_id);
        }
        if changed {
            plan.rewrites.push(CartRewrite { cart_id, items });
        }
    }

    plan
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    pub scanned: usize,
    pub skipped: usize,
    pub rewritten: usize,
    pub deleted: u64,
}

impl From<&RepairPlan> for RepairReport {
    fn from(plan: &RepairPlan) -> Self {
        Self {
            scanned: plan.scanned,
            skipped: 0,
            rewritten: plan.rewrites.len(),
            deleted: plan.deletions.len() as u64,
        }
    }
}

/// Computes the plan and reports what a real pass would do.
pub async fn preview_repair<S: CartStore + ?Sized>(store: &S) -> Result<RepairReport> {
    let UnresolvedScan { carts, skipped } = store.find_unresolved().await?;
    let plan = plan_repair(carts);

    for rewrite in &plan.rewrites {
        tracing::info!(cart_id = %rewrite.cart_id, "would rewrite cart");
    }
    for cart_id in &plan.deletions {
        tracing::info!(%cart_id, "would delete cart");
    }

    Ok(RepairReport {
        skipped: skipped.len(),
        ..RepairReport::from(&plan)
    })
}

/// Runs both phases against `store`.
///
/// A failed write in phase 1 aborts before the sweep: sweeping then would
/// delete carts whose legacy items were never rewritten. For the same reason
/// the sweep spares carts that could not be decoded.
pub async fn repair_all_carts<S: CartStore + ?Sized>(store: &S) -> Result<RepairReport> {
    let UnresolvedScan { carts, skipped } = store.find_unresolved().await?;
    let plan = plan_repair(carts);
    tracing::info!(
        scanned = plan.scanned,
        skipped = skipped.len(),
        rewrites = plan.rewrites.len(),
        expected_deletions = plan.deletions.len(),
        "repair plan ready"
    );

    let mut report = RepairReport {
        scanned: plan.scanned,
        skipped: skipped.len(),
        ..RepairReport::default()
    };

    for rewrite in &plan.rewrites {
        match store.replace_items(&rewrite.cart_id, &rewrite.items).await {
            Ok(true) => {
                report.rewritten += 1;
                tracing::debug!(cart_id = %rewrite.cart_id, items = rewrite.items.len(), "cart rewritten");
            }
            Ok(false) => {
                tracing::warn!(cart_id = %rewrite.cart_id, "cart disappeared before rewrite");
            }
            Err(e) => {
                tracing::error!(cart_id = %rewrite.cart_id, error = %e, "rewrite failed, skipping cleanup sweep");
                return Err(e);
            }
        }
    }

    report.deleted = store.delete_unresolved(&skipped).await?;

    tracing::info!(
        scanned = report.scanned,
        skipped = report.skipped,
        rewritten = report.rewritten,
        deleted = report.deleted,
        "cart repair finished"
    );

    Ok(report)
}
