//! Clients domain module.
//!
//! A client owns a list of products and carries the aggregate amount computed
//! over them. Pure domain logic only (no IO, no storage).

pub mod client;

pub use client::{Client, ClientType};
