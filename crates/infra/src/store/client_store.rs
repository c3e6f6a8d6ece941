use std::collections::HashMap;
use std::sync::RwLock;

use clientbook_business::{ClientDataAccess, DataAccessError};
use clientbook_clients::Client;
use clientbook_core::{ClientId, Entity};

use super::lock_poisoned;

/// In-memory client store for tests/dev.
///
/// `save_client` is an upsert; every save is also appended to the history.
#[derive(Debug, Default)]
pub struct InMemoryClientStore {
    clients: RwLock<HashMap<ClientId, Client>>,
    saved: RwLock<Vec<Client>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, client_id: ClientId) -> Option<Client> {
        let map = self.clients.read().ok()?;
        map.get(&client_id).cloned()
    }

    /// Every client passed to `save_client`, oldest first.
    pub fn saved(&self) -> Vec<Client> {
        match self.saved.read() {
            Ok(saved) => saved.clone(),
            Err(_) => vec![],
        }
    }
}

impl ClientDataAccess for InMemoryClientStore {
    fn save_client(&self, client: &Client) -> Result<(), DataAccessError> {
        let mut map = self.clients.write().map_err(|_| lock_poisoned())?;
        map.insert(client.id(), client.clone());

        let mut saved = self.saved.write().map_err(|_| lock_poisoned())?;
        saved.push(client.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_is_an_upsert_with_history() {
        let store = InMemoryClientStore::new();
        let id = ClientId::new(5);

        store.save_client(&Client::with_products(id, vec![])).unwrap();
        store
            .save_client(&Client::new(id, Some("Acme".into()), None, vec![]))
            .unwrap();

        assert_eq!(store.get(id).unwrap().name(), Some("Acme"));
        assert_eq!(store.saved().len(), 2);
        assert!(store.get(ClientId::new(6)).is_none());
    }
}
