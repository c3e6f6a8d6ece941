use serde::{Deserialize, Serialize};

use clientbook_core::{Entity, ProductId};

use crate::money::Amount;

/// Kind of financial product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    BankGuarantee,
    Derivative,
    Investment,
}

/// A product held by a client.
///
/// Identity is the `id`: two products with the same id are the same logical
/// product, and a differing `amount` means it changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    product_type: ProductType,
    amount: Amount,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        product_type: ProductType,
        amount: Amount,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            product_type,
            amount,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    /// Same product with a different amount.
    pub fn with_amount(&self, amount: Amount) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// Whether `other` carries a different amount than this product.
    pub fn amount_differs(&self, other: &Product) -> bool {
        self.amount != other.amount
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}
