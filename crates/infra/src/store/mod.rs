//! In-memory stores implementing the business layer's data-access traits.
//!
//! Every successful mutation is recorded in an ordered journal, so tests and
//! the CLI can inspect exactly which calls reached the store.

pub mod client_store;
pub mod product_store;

use serde::{Deserialize, Serialize};

use clientbook_business::DataAccessError;
use clientbook_core::ClientId;
use clientbook_products::Product;

pub use client_store::InMemoryClientStore;
pub use product_store::InMemoryProductStore;

/// Kind of product mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Insert,
    Update,
    Delete,
}

/// A product mutation that reached the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOperation {
    pub kind: OperationKind,
    pub client_id: ClientId,
    pub product: Product,
}

pub(crate) fn lock_poisoned() -> DataAccessError {
    DataAccessError::Unavailable("lock poisoned".to_string())
}
