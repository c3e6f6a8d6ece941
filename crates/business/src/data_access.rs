//! Data-access collaborator contracts.
//!
//! The business layer only sees these traits. Implementations:
//!
//! - `clientbook_infra::InMemoryProductStore` / `InMemoryClientStore` (tests, dev, CLI)
//! - `mockall` mocks under `cfg(test)`

use std::sync::Arc;

use thiserror::Error;

use clientbook_clients::Client;
use clientbook_core::ClientId;
use clientbook_products::Product;

/// Failure reported by a data-access collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataAccessError {
    /// The record to update or delete does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The record to insert already exists.
    #[error("record already exists: {0}")]
    Conflict(String),

    /// The backing store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Product persistence for a client.
#[cfg_attr(test, mockall::automock)]
pub trait ProductDataAccess {
    /// All products currently persisted for `client_id`.
    fn list_products(&self, client_id: ClientId) -> Result<Vec<Product>, DataAccessError>;

    fn insert_product(&self, client_id: ClientId, product: &Product)
    -> Result<(), DataAccessError>;

    /// Overwrite the persisted product with the same id.
    fn update_product(&self, client_id: ClientId, product: &Product)
    -> Result<(), DataAccessError>;

    fn delete_product(&self, client_id: ClientId, product: &Product)
    -> Result<(), DataAccessError>;
}

/// Client persistence.
#[cfg_attr(test, mockall::automock)]
pub trait ClientDataAccess {
    fn save_client(&self, client: &Client) -> Result<(), DataAccessError>;
}

impl<S> ProductDataAccess for Arc<S>
where
    S: ProductDataAccess + ?Sized,
{
    fn list_products(&self, client_id: ClientId) -> Result<Vec<Product>, DataAccessError> {
        (**self).list_products(client_id)
    }

    fn insert_product(
        &self,
        client_id: ClientId,
        product: &Product,
    ) -> Result<(), DataAccessError> {
        (**self).insert_product(client_id, product)
    }

    fn update_product(
        &self,
        client_id: ClientId,
        product: &Product,
    ) -> Result<(), DataAccessError> {
        (**self).update_product(client_id, product)
    }

    fn delete_product(
        &self,
        client_id: ClientId,
        product: &Product,
    ) -> Result<(), DataAccessError> {
        (**self).delete_product(client_id, product)
    }
}

impl<S> ClientDataAccess for Arc<S>
where
    S: ClientDataAccess + ?Sized,
{
    fn save_client(&self, client: &Client) -> Result<(), DataAccessError> {
        (**self).save_client(client)
    }
}
