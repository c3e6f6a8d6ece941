use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use clientbook_business::{DataAccessError, ProductDataAccess};
use clientbook_core::{ClientId, Entity, ProductId};
use clientbook_products::Product;

use super::{OperationKind, StoreOperation, lock_poisoned};

/// In-memory product store for tests/dev.
///
/// Products are kept per client, keyed (and listed) by product id. Inserting an
/// id that exists is a `Conflict`; updating or deleting a missing id is
/// `NotFound`.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<HashMap<ClientId, BTreeMap<ProductId, Product>>>,
    journal: RwLock<Vec<StoreOperation>>,
    fail_on: RwLock<Option<OperationKind>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload products for a client without recording them in the journal.
    ///
    /// Later products replace earlier ones with the same id.
    pub fn seed(
        &self,
        client_id: ClientId,
        products: impl IntoIterator<Item = Product>,
    ) -> Result<(), DataAccessError> {
        let mut map = self.products.write().map_err(|_| lock_poisoned())?;
        let entry = map.entry(client_id).or_default();
        for product in products {
            entry.insert(product.id(), product);
        }
        Ok(())
    }

    /// Make every subsequent operation of `kind` fail with `Unavailable`.
    ///
    /// `None` clears the failure.
    pub fn fail_on(&self, kind: Option<OperationKind>) {
        if let Ok(mut fail_on) = self.fail_on.write() {
            *fail_on = kind;
        }
    }

    /// Successful mutations, oldest first.
    pub fn journal(&self) -> Vec<StoreOperation> {
        match self.journal.read() {
            Ok(journal) => journal.clone(),
            Err(_) => vec![],
        }
    }

    pub fn clear_journal(&self) {
        if let Ok(mut journal) = self.journal.write() {
            journal.clear();
        }
    }

    fn check_failure(&self, kind: OperationKind) -> Result<(), DataAccessError> {
        let fail_on = self.fail_on.read().map_err(|_| lock_poisoned())?;
        if *fail_on == Some(kind) {
            return Err(DataAccessError::Unavailable(format!(
                "{kind:?} rejected by test configuration"
            )));
        }
        Ok(())
    }

    fn mutate<F>(
        &self,
        kind: OperationKind,
        client_id: ClientId,
        product: &Product,
        op: F,
    ) -> Result<(), DataAccessError>
    where
        F: FnOnce(&mut BTreeMap<ProductId, Product>) -> Result<(), DataAccessError>,
    {
        self.check_failure(kind)?;

        let mut map = self.products.write().map_err(|_| lock_poisoned())?;
        op(map.entry(client_id).or_default())?;

        let mut journal = self.journal.write().map_err(|_| lock_poisoned())?;
        journal.push(StoreOperation {
            kind,
            client_id,
            product: product.clone(),
        });

        tracing::trace!(?kind, %client_id, product_id = %product.id(), "store mutation");
        Ok(())
    }
}

fn describe(client_id: ClientId, product_id: ProductId) -> String {
    format!("product {product_id} of client {client_id}")
}

impl ProductDataAccess for InMemoryProductStore {
    fn list_products(&self, client_id: ClientId) -> Result<Vec<Product>, DataAccessError> {
        let map = self.products.read().map_err(|_| lock_poisoned())?;
        Ok(map
            .get(&client_id)
            .map(|products| products.values().cloned().collect())
            .unwrap_or_default())
    }

    fn insert_product(
        &self,
        client_id: ClientId,
        product: &Product,
    ) -> Result<(), DataAccessError> {
        self.mutate(OperationKind::Insert, client_id, product, |products| {
            if products.contains_key(&product.id()) {
                return Err(DataAccessError::Conflict(describe(client_id, product.id())));
            }
            products.insert(product.id(), product.clone());
            Ok(())
        })
    }

    fn update_product(
        &self,
        client_id: ClientId,
        product: &Product,
    ) -> Result<(), DataAccessError> {
        self.mutate(OperationKind::Update, client_id, product, |products| {
            match products.get_mut(&product.id()) {
                Some(slot) => {
                    *slot = product.clone();
                    Ok(())
                }
                None => Err(DataAccessError::NotFound(describe(client_id, product.id()))),
            }
        })
    }

    fn delete_product(
        &self,
        client_id: ClientId,
        product: &Product,
    ) -> Result<(), DataAccessError> {
        self.mutate(OperationKind::Delete, client_id, product, |products| {
            products
                .remove(&product.id())
                .map(|_| ())
                .ok_or_else(|| DataAccessError::NotFound(describe(client_id, product.id())))
        })
    }
}
