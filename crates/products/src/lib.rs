//! Products domain module.
//!
//! Money (currencies and amounts) and the products a client holds, implemented
//! purely as deterministic domain logic (no IO, no storage).

pub mod money;
pub mod product;

pub use money::{Amount, Currency};
pub use product::{Product, ProductType};
