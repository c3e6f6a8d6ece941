use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clientbook_core::{ClientId, DomainResult, Entity};
use clientbook_products::{Amount, Currency, Product};

/// Client kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    Private,
    Business,
}

/// A client and the products it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    name: Option<String>,
    client_type: Option<ClientType>,
    /// Aggregate of the product amounts; zero until computed.
    #[serde(default)]
    product_amount: Decimal,
    #[serde(default)]
    products: Vec<Product>,
}

impl Client {
    pub fn new(
        id: ClientId,
        name: Option<String>,
        client_type: Option<ClientType>,
        products: Vec<Product>,
    ) -> Self {
        Self {
            id,
            name,
            client_type,
            product_amount: Decimal::ZERO,
            products,
        }
    }

    /// Client known only by id, holding `products`.
    pub fn with_products(id: ClientId, products: Vec<Product>) -> Self {
        Self::new(id, None, None, products)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn client_type(&self) -> Option<ClientType> {
        self.client_type
    }

    pub fn product_amount(&self) -> Decimal {
        self.product_amount
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Sum of the amounts of all products this client holds.
    pub fn products_sum(&self, default_currency: Currency) -> DomainResult<Amount> {
        Amount::sum(self.products.iter().map(Product::amount), default_currency)
    }

    /// Recompute `product_amount` from the held products.
    ///
    /// Leaves the client untouched when the products cannot be summed.
    pub fn refresh_product_amount(&mut self, default_currency: Currency) -> DomainResult<Amount> {
        let total = self.products_sum(default_currency)?;
        self.product_amount = total.value;
        Ok(total)
    }
}

impl Entity for Client {
    type Id = ClientId;

    fn id(&self) -> ClientId {
        self.id
    }
}
