//! Business layer: client product aggregation and product reconciliation.
//!
//! The service talks to persistence only through the traits in
//! [`data_access`]; concrete stores live in `clientbook-infra`.

pub mod client_service;
pub mod config;
pub mod data_access;
pub mod error;
pub mod reconcile;

pub use client_service::ClientBusinessService;
pub use config::{BusinessConfig, ConfigError};
pub use data_access::{ClientDataAccess, DataAccessError, ProductDataAccess};
pub use error::{BusinessError, BusinessResult};
pub use reconcile::{ProductChange, ReconciliationPlan, plan_reconciliation};

#[cfg(test)]
pub use data_access::{MockClientDataAccess, MockProductDataAccess};
