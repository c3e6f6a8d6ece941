//! Client business operations: product sums and product reconciliation.

use tracing::{debug, info, instrument, warn};

use clientbook_clients::Client;
use clientbook_core::{ClientId, Entity};
use clientbook_products::{Amount, Product};

use crate::config::BusinessConfig;
use crate::data_access::{ClientDataAccess, ProductDataAccess};
use crate::error::BusinessResult;
use crate::reconcile::{ProductChange, ReconciliationPlan, plan_reconciliation};

/// Business object for a client's products.
///
/// Holds no state of its own beyond the injected collaborators and settings;
/// every call reads what it needs from the collaborators and writes back
/// immediately.
///
/// ## Failure semantics
///
/// Changes are applied one at a time, in plan order. The first collaborator
/// failure is returned as-is and nothing after it is attempted; changes applied
/// before it stay applied (no transaction, no retry).
#[derive(Debug)]
pub struct ClientBusinessService<P, C> {
    products: P,
    clients: C,
    config: BusinessConfig,
}

impl<P, C> ClientBusinessService<P, C> {
    pub fn new(products: P, clients: C) -> Self {
        Self::with_config(products, clients, BusinessConfig::default())
    }

    pub fn with_config(products: P, clients: C, config: BusinessConfig) -> Self {
        Self {
            products,
            clients,
            config,
        }
    }
}

impl<P, C> ClientBusinessService<P, C>
where
    P: ProductDataAccess,
    C: ClientDataAccess,
{
    /// Sum of the amounts of every product persisted for `client_id`.
    ///
    /// A client without products sums to zero in the configured default currency.
    #[instrument(skip_all, fields(client_id = %client_id))]
    pub fn client_products_sum(&self, client_id: ClientId) -> BusinessResult<Amount> {
        let products = self.products.list_products(client_id)?;
        let total = Amount::sum(
            products.iter().map(Product::amount),
            self.config.default_currency,
        )?;

        debug!(products = products.len(), total = %total, "summed client products");
        Ok(total)
    }

    /// Plan the changes `save_changed_products` would apply, without applying them.
    #[instrument(skip_all, fields(client_id = %client_id, desired = desired.len()))]
    pub fn plan_changed_products(
        &self,
        client_id: ClientId,
        desired: &[Product],
    ) -> BusinessResult<ReconciliationPlan> {
        let current = self.products.list_products(client_id)?;
        Ok(plan_reconciliation(&current, desired)?)
    }

    /// Make the persisted products of `client_id` match `desired`.
    ///
    /// Returns the plan that was applied.
    #[instrument(skip_all, fields(client_id = %client_id, desired = desired.len()))]
    pub fn save_changed_products(
        &self,
        client_id: ClientId,
        desired: &[Product],
    ) -> BusinessResult<ReconciliationPlan> {
        let current = self.products.list_products(client_id)?;
        let plan = plan_reconciliation(&current, desired)?;

        for change in plan.changes() {
            self.apply(client_id, change)?;
        }

        info!(
            inserts = plan.inserts(),
            updates = plan.updates(),
            deletes = plan.deletes(),
            "reconciled client products"
        );
        Ok(plan)
    }

    /// Store the sum of the client's own products in `product_amount` and save the client.
    ///
    /// Nothing is saved when the products cannot be summed.
    #[instrument(skip_all, fields(client_id = %client.id()))]
    pub fn calculate_and_save_client_product_sum(
        &self,
        client: &mut Client,
    ) -> BusinessResult<Amount> {
        let total = client.refresh_product_amount(self.config.default_currency)?;
        self.clients.save_client(client)?;

        debug!(total = %total, "saved client product amount");
        Ok(total)
    }

    fn apply(&self, client_id: ClientId, change: &ProductChange) -> BusinessResult<()> {
        let result = match change {
            ProductChange::Insert(p) => self.products.insert_product(client_id, p),
            ProductChange::Update(p) => self.products.update_product(client_id, p),
            ProductChange::Delete(p) => self.products.delete_product(client_id, p),
        };

        match result {
            Ok(()) => {
                debug!(change = change.kind(), product_id = %change.product().id(), "applied");
                Ok(())
            }
            Err(err) => {
                warn!(
                    change = change.kind(),
                    product_id = %change.product().id(),
                    error = %err,
                    "product change failed"
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use clientbook_core::{DomainError, ProductId};
    use clientbook_products::{Currency, ProductType};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::data_access::{DataAccessError, MockClientDataAccess, MockProductDataAccess};
    use crate::error::BusinessError;

    const CLIENT_ID: ClientId = ClientId::new(1);

    fn product_with_amount(value: Decimal) -> Product {
        product(100, value)
    }

    fn product(id: i64, value: Decimal) -> Product {
        Product::new(
            ProductId::new(id),
            "Product 15",
            ProductType::BankGuarantee,
            Amount::new(value, Currency::Euro),
        )
    }

    fn service(
        products: MockProductDataAccess,
    ) -> ClientBusinessService<MockProductDataAccess, MockClientDataAccess> {
        ClientBusinessService::new(products, MockClientDataAccess::new())
    }

    fn listing(products: Vec<Product>) -> MockProductDataAccess {
        let mut mock = MockProductDataAccess::new();
        mock.expect_list_products()
            .withf(|id| *id == CLIENT_ID)
            .times(1)
            .returning(move |_| Ok(products.clone()));
        mock
    }

    #[test]
    fn client_products_sum_adds_product_amounts() {
        let mock = listing(vec![product(1, dec!(5.0)), product(2, dec!(6.0))]);

        let total = service(mock).client_products_sum(CLIENT_ID).unwrap();

        assert_eq!(total.currency, Currency::Euro);
        assert_eq!(total.value, dec!(11.0));
    }

    #[test]
    fn client_products_sum_of_nothing_is_zero_in_default_currency() {
        let config = BusinessConfig::default().with_default_currency(Currency::IndianRupee);
        let svc = ClientBusinessService::with_config(
            listing(vec![]),
            MockClientDataAccess::new(),
            config,
        );

        let total = svc.client_products_sum(CLIENT_ID).unwrap();

        assert_eq!(total, Amount::zero(Currency::IndianRupee));
    }

    #[test]
    fn client_products_sum_rejects_mixed_currencies() {
        let usd = Product::new(
            ProductId::new(2),
            "Product 16",
            ProductType::Investment,
            Amount::new(dec!(6.0), Currency::UsDollar),
        );
        let mock = listing(vec![product(1, dec!(5.0)), usd]);

        let err = service(mock).client_products_sum(CLIENT_ID).unwrap_err();

        assert!(matches!(
            err,
            BusinessError::Domain(DomainError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn save_changed_products_inserts_product_missing_from_store() {
        let desired = vec![product_with_amount(dec!(5.0))];
        let expected = desired[0].clone();

        let mut mock = listing(vec![]);
        mock.expect_insert_product()
            .withf(move |id, p| *id == CLIENT_ID && *p == expected)
            .times(1)
            .returning(|_, _| Ok(()));
        mock.expect_update_product().times(0);
        mock.expect_delete_product().times(0);

        let plan = service(mock).save_changed_products(CLIENT_ID, &desired).unwrap();

        assert_eq!(plan.inserts(), 1);
    }

    #[test]
    fn save_changed_products_deletes_product_no_longer_desired() {
        let persisted = product_with_amount(dec!(5.0));
        let expected = persisted.clone();

        let mut mock = listing(vec![persisted]);
        mock.expect_delete_product()
            .withf(move |id, p| *id == CLIENT_ID && *p == expected)
            .times(1)
            .returning(|_, _| Ok(()));
        mock.expect_insert_product().times(0);
        mock.expect_update_product().times(0);

        let plan = service(mock).save_changed_products(CLIENT_ID, &[]).unwrap();

        assert_eq!(plan.deletes(), 1);
    }

    #[test]
    fn save_changed_products_updates_product_with_changed_amount() {
        let desired = vec![product_with_amount(dec!(5.0))];

        let mut mock = listing(vec![product_with_amount(dec!(6.0))]);
        mock.expect_update_product()
            .withf(|id, p| *id == CLIENT_ID && p.amount().value == dec!(5.0))
            .times(1)
            .returning(|_, _| Ok(()));
        mock.expect_insert_product().times(0);
        mock.expect_delete_product().times(0);

        let plan = service(mock).save_changed_products(CLIENT_ID, &desired).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan.updates(), 1);
    }

    #[test]
    fn save_changed_products_leaves_unchanged_product_alone() {
        let desired = vec![product_with_amount(dec!(5.0))];

        let mut mock = listing(vec![product_with_amount(dec!(5.0))]);
        mock.expect_insert_product().times(0);
        mock.expect_update_product().times(0);
        mock.expect_delete_product().times(0);

        let plan = service(mock).save_changed_products(CLIENT_ID, &desired).unwrap();

        assert!(plan.is_empty());
    }

    #[test]
    fn save_changed_products_stops_at_first_failure() {
        let desired = vec![product(1, dec!(1.0)), product(2, dec!(2.0))];

        let mut mock = listing(vec![]);
        mock.expect_insert_product()
            .withf(|_, p| p.id() == ProductId::new(1))
            .times(1)
            .returning(|_, _| Err(DataAccessError::Unavailable("connection reset".into())));
        mock.expect_insert_product()
            .withf(|_, p| p.id() == ProductId::new(2))
            .times(0);

        let err = service(mock).save_changed_products(CLIENT_ID, &desired).unwrap_err();

        assert_eq!(
            err,
            BusinessError::DataAccess(DataAccessError::Unavailable("connection reset".into()))
        );
    }

    #[test]
    fn save_changed_products_rejects_duplicate_ids_before_writing() {
        let desired = vec![product(1, dec!(1.0)), product(1, dec!(2.0))];

        let mut mock = listing(vec![]);
        mock.expect_insert_product().times(0);

        let err = service(mock).save_changed_products(CLIENT_ID, &desired).unwrap_err();

        assert!(matches!(err, BusinessError::Domain(DomainError::Validation(_))));
    }

    #[test]
    fn save_changed_products_propagates_listing_failure() {
        let mut mock = MockProductDataAccess::new();
        mock.expect_list_products()
            .returning(|_| Err(DataAccessError::Unavailable("down".into())));

        let err = service(mock).save_changed_products(CLIENT_ID, &[]).unwrap_err();

        assert!(matches!(err, BusinessError::DataAccess(_)));
    }

    #[test]
    fn plan_changed_products_does_not_write() {
        let desired = vec![product(1, dec!(1.0))];

        let mut mock = listing(vec![product(2, dec!(2.0))]);
        mock.expect_insert_product().times(0);
        mock.expect_delete_product().times(0);

        let plan = service(mock).plan_changed_products(CLIENT_ID, &desired).unwrap();

        assert_eq!((plan.inserts(), plan.deletes()), (1, 1));
    }

    #[test]
    fn calculate_and_save_client_product_sum_saves_the_total() {
        let captured: Arc<Mutex<Vec<Client>>> = Arc::default();
        let sink = Arc::clone(&captured);

        let mut clients = MockClientDataAccess::new();
        clients
            .expect_save_client()
            .times(1)
            .returning(move |client| {
                sink.lock().unwrap().push(client.clone());
                Ok(())
            });

        let svc = ClientBusinessService::new(MockProductDataAccess::new(), clients);
        let mut client = Client::with_products(
            ClientId::new(0),
            vec![product_with_amount(dec!(6.0)), product_with_amount(dec!(6.0))],
        );

        let total = svc.calculate_and_save_client_product_sum(&mut client).unwrap();

        assert_eq!(total.value, dec!(12.0));
        let saved = captured.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].product_amount(), dec!(12.0));
    }

    #[test]
    fn calculate_and_save_client_product_sum_saves_nothing_on_mismatch() {
        let mut clients = MockClientDataAccess::new();
        clients.expect_save_client().times(0);

        let svc = ClientBusinessService::new(MockProductDataAccess::new(), clients);
        let mut client = Client::with_products(
            ClientId::new(0),
            vec![
                product(1, dec!(6.0)),
                Product::new(
                    ProductId::new(2),
                    "Product 16",
                    ProductType::Derivative,
                    Amount::new(dec!(6.0), Currency::UsDollar),
                ),
            ],
        );

        let err = svc.calculate_and_save_client_product_sum(&mut client).unwrap_err();

        assert!(matches!(
            err,
            BusinessError::Domain(DomainError::CurrencyMismatch { .. })
        ));
        assert_eq!(client.product_amount(), Decimal::ZERO);
    }

    #[test]
    fn calculate_and_save_client_product_sum_propagates_save_failure() {
        let mut clients = MockClientDataAccess::new();
        clients
            .expect_save_client()
            .returning(|_| Err(DataAccessError::Unavailable("read-only".into())));

        let svc = ClientBusinessService::new(MockProductDataAccess::new(), clients);
        let mut client = Client::with_products(ClientId::new(0), vec![]);

        let err = svc.calculate_and_save_client_product_sum(&mut client).unwrap_err();

        assert!(matches!(err, BusinessError::DataAccess(DataAccessError::Unavailable(_))));
    }
}
