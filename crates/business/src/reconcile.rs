//! Product reconciliation planning.
//!
//! Compares the products a caller wants a client to hold (the *desired* list)
//! with the products currently persisted (the *current* list) and decides, per
//! product id, whether to insert, update or delete. Planning is pure; applying
//! the plan is the job of [`crate::ClientBusinessService`].
//!
//! ```text
//! desired ∖ current (by id)            → Insert(desired)
//! desired ∩ current, amount differs    → Update(desired)
//! desired ∩ current, amount equal      → (nothing)
//! current ∖ desired (by id)            → Delete(current)
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use clientbook_core::{DomainError, DomainResult, Entity, ProductId};
use clientbook_products::Product;

/// One persistence action produced by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "product", rename_all = "lowercase")]
pub enum ProductChange {
    /// Product is desired but not persisted.
    Insert(Product),
    /// Product is persisted with a different amount; carries the desired value.
    Update(Product),
    /// Product is persisted but no longer desired; carries the persisted value.
    Delete(Product),
}

impl ProductChange {
    /// Stable label for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ProductChange::Insert(_) => "products.product.inserted",
            ProductChange::Update(_) => "products.product.updated",
            ProductChange::Delete(_) => "products.product.deleted",
        }
    }

    pub fn product(&self) -> &Product {
        match self {
            ProductChange::Insert(p) | ProductChange::Update(p) | ProductChange::Delete(p) => p,
        }
    }
}

/// Ordered list of changes: inserts and updates in desired order, then deletes
/// in current order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReconciliationPlan {
    changes: Vec<ProductChange>,
}

impl ReconciliationPlan {
    pub fn changes(&self) -> &[ProductChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn inserts(&self) -> usize {
        self.count(|c| matches!(c, ProductChange::Insert(_)))
    }

    pub fn updates(&self) -> usize {
        self.count(|c| matches!(c, ProductChange::Update(_)))
    }

    pub fn deletes(&self) -> usize {
        self.count(|c| matches!(c, ProductChange::Delete(_)))
    }

    fn count(&self, pred: impl Fn(&ProductChange) -> bool) -> usize {
        self.changes.iter().filter(|c| pred(c)).count()
    }
}

/// Compute the changes that turn `current` into `desired`.
///
/// Products are matched by id only, so list order does not matter. Either list
/// holding the same product id twice is rejected with `DomainError::Validation`.
pub fn plan_reconciliation(
    current: &[Product],
    desired: &[Product],
) -> DomainResult<ReconciliationPlan> {
    let current_by_id = index_by_id(current, "current")?;
    let desired_ids: HashSet<ProductId> = index_by_id(desired, "desired")?.into_keys().collect();

    let mut changes = Vec::new();

    for wanted in desired {
        match current_by_id.get(&wanted.id()) {
            None => changes.push(ProductChange::Insert(wanted.clone())),
            Some(persisted) if persisted.amount_differs(wanted) => {
                changes.push(ProductChange::Update(wanted.clone()))
            }
            Some(_) => {}
        }
    }

    for persisted in current {
        if !desired_ids.contains(&persisted.id()) {
            changes.push(ProductChange::Delete(persisted.clone()));
        }
    }

    Ok(ReconciliationPlan { changes })
}

fn index_by_id<'a>(
    products: &'a [Product],
    list: &str,
) -> DomainResult<HashMap<ProductId, &'a Product>> {
    let mut by_id = HashMap::with_capacity(products.len());
    for product in products {
        if by_id.insert(product.id(), product).is_some() {
            return Err(DomainError::validation(format!(
                "duplicate product id {} in {list} list",
                product.id()
            )));
        }
    }
    Ok(by_id)
}
