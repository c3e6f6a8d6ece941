//! Infrastructure layer: data-access implementations for the business layer.

pub mod store;

pub use store::{
    InMemoryClientStore, InMemoryProductStore, OperationKind, StoreOperation,
};
