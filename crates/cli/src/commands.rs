//! Command implementations, kept apart from argument parsing so they can be tested.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use clientbook_business::{
    BusinessConfig, ClientBusinessService, ProductDataAccess, ReconciliationPlan,
};
use clientbook_clients::Client;
use clientbook_core::ClientId;
use clientbook_infra::{InMemoryClientStore, InMemoryProductStore, StoreOperation};
use clientbook_products::{Amount, Currency, Product};

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Configuration from the environment, with `--currency` taking precedence.
pub fn load_config(currency: Option<&str>) -> Result<BusinessConfig> {
    override_currency(BusinessConfig::from_env()?, currency)
}

pub fn override_currency(config: BusinessConfig, currency: Option<&str>) -> Result<BusinessConfig> {
    let Some(raw) = currency else {
        return Ok(config);
    };
    let currency = raw
        .parse::<Currency>()
        .with_context(|| format!("invalid --currency {raw:?}"))?;
    Ok(config.with_default_currency(currency))
}

pub fn sum(products: &[Product], config: BusinessConfig) -> Result<Amount> {
    Ok(Amount::sum(
        products.iter().map(Product::amount),
        config.default_currency,
    )?)
}

#[derive(Debug, Serialize)]
pub struct ReconcileReport {
    pub client_id: ClientId,
    pub dry_run: bool,
    pub changes: ReconciliationPlan,
    /// Mutations that reached the store (empty on a dry run).
    pub applied: Vec<StoreOperation>,
    /// Products held by the client afterwards.
    pub products: Vec<Product>,
}

pub fn reconcile(
    client_id: ClientId,
    current: Vec<Product>,
    desired: &[Product],
    dry_run: bool,
    config: BusinessConfig,
) -> Result<ReconcileReport> {
    let store = Arc::new(InMemoryProductStore::new());
    store.seed(client_id, current)?;
    let service =
        ClientBusinessService::with_config(Arc::clone(&store), InMemoryClientStore::new(), config);

    let changes = if dry_run {
        service.plan_changed_products(client_id, desired)?
    } else {
        service.save_changed_products(client_id, desired)?
    };
    tracing::info!(%client_id, dry_run, changes = changes.len(), "reconcile finished");

    Ok(ReconcileReport {
        client_id,
        dry_run,
        changes,
        applied: store.journal(),
        products: store.list_products(client_id)?,
    })
}

pub fn total(mut client: Client, config: BusinessConfig) -> Result<Client> {
    let clients = Arc::new(InMemoryClientStore::new());
    let service =
        ClientBusinessService::with_config(InMemoryProductStore::new(), Arc::clone(&clients), config);

    service.calculate_and_save_client_product_sum(&mut client)?;
    Ok(client)
}
