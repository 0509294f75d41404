use chrono::{DateTime, Utc};

use shopfront_catalog::{Catalog, NewProduct};
use shopfront_core::{DomainResult, Money, OrderId, ProductId};
use shopfront_orders::{CheckoutOutcome, Order, OrderBook, OrderLine, OrderSummary};

use crate::config::ShopConfig;
use crate::listing::Listing;

/// Shop context: the catalog and every order, owned together.
///
/// All order operations go through [`Shop::with_order`], which resolves the
/// order (failing with `OrderMissing` once it has been deleted) before the
/// order's own open-state check runs.
#[derive(Debug, Clone, Default)]
pub struct Shop {
    catalog: Catalog,
    orders: OrderBook,
}

impl Shop {
    pub fn new(config: &ShopConfig) -> Self {
        Self {
            catalog: Catalog::with_id_base(config.product_id_base),
            orders: OrderBook::with_id_base(config.order_id_base),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    /// Register one catalog product.
    pub fn add_product(&mut self, input: NewProduct) -> DomainResult<ProductId> {
        self.catalog.add(input)
    }

    /// Register every item; stops at the first invalid one.
    pub fn seed<I>(&mut self, items: I) -> DomainResult<Vec<ProductId>>
    where
        I: IntoIterator<Item = NewProduct>,
    {
        let ids = items
            .into_iter()
            .map(|item| self.catalog.add(item))
            .collect::<DomainResult<Vec<_>>>()?;
        tracing::info!(count = ids.len(), "catalog seeded");
        Ok(ids)
    }

    /// Available products for browsing.
    pub fn listing(&self) -> Listing {
        Listing::from_catalog(&self.catalog)
    }

    pub fn open_order(&mut self) -> OrderId {
        self.orders.open(Utc::now())
    }

    /// Open an order pre-filled with `(product, quantity)` items.
    ///
    /// All or nothing: if any item fails, the catalog and order book are left
    /// exactly as they were, including their id counters.
    pub fn open_order_with<I>(&mut self, items: I) -> DomainResult<OrderId>
    where
        I: IntoIterator<Item = (ProductId, u32)>,
    {
        let mut catalog = self.catalog.clone();
        let mut orders = self.orders.clone();

        let id = orders.open(Utc::now());
        let order = orders.order_mut(id)?;
        for (product, quantity) in items {
            order.add_product(&mut catalog, product, quantity).inspect_err(|err| {
                tracing::warn!(order_id = %id, product_id = %product, error = %err, "pre-filled order discarded");
            })?;
        }
        let lines = order.product_ids().len();

        self.catalog = catalog;
        self.orders = orders;
        tracing::info!(order_id = %id, lines, "order opened with items");
        Ok(id)
    }

    pub fn order(&self, id: OrderId) -> DomainResult<&Order> {
        self.orders.order(id)
    }

    pub fn add_to_order(
        &mut self,
        order: OrderId,
        product: ProductId,
        quantity: u32,
    ) -> DomainResult<ProductId> {
        self.with_order(order, |o, catalog| o.add_product(catalog, product, quantity))
    }

    pub fn remove_from_order(&mut self, order: OrderId, unit: ProductId) -> DomainResult<()> {
        self.with_order(order, |o, catalog| o.remove_product(catalog, unit))
    }

    pub fn update_quantity(
        &mut self,
        order: OrderId,
        unit: ProductId,
        quantity: u32,
    ) -> DomainResult<u32> {
        self.with_order(order, |o, catalog| o.update_quantity(catalog, unit, quantity))
    }

    /// Empty an order's cart; see [`Order::clear_products`].
    pub fn clear_order(&mut self, order: OrderId) -> DomainResult<u64> {
        self.with_order(order, |o, catalog| o.clear_products(catalog))
    }

    pub fn delete_order(&mut self, order: OrderId) -> DomainResult<()> {
        self.orders.delete(order).map(|_| ())
    }

    pub fn total_price(&self, order: OrderId) -> DomainResult<Money> {
        Ok(self.orders.order(order)?.total_price(&self.catalog))
    }

    pub fn checkout(&mut self, order: OrderId) -> DomainResult<CheckoutOutcome> {
        self.checkout_at(order, Utc::now())
    }

    pub fn checkout_at(&mut self, order: OrderId, at: DateTime<Utc>) -> DomainResult<CheckoutOutcome> {
        self.with_order(order, |o, catalog| o.checkout(catalog, at))
    }

    /// Cart contents with line totals.
    pub fn cart(&self, order: OrderId) -> DomainResult<Vec<OrderLine>> {
        Ok(self.orders.order(order)?.lines(&self.catalog))
    }

    pub fn summary(&self, order: OrderId) -> DomainResult<OrderSummary> {
        Ok(self.orders.order(order)?.summary(&self.catalog))
    }

    fn with_order<T>(
        &mut self,
        order: OrderId,
        f: impl FnOnce(&mut Order, &mut Catalog) -> DomainResult<T>,
    ) -> DomainResult<T> {
        let o = self.orders.order_mut(order)?;
        f(o, &mut self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_catalog;
    use shopfront_core::DomainError;

    fn seeded_shop() -> (Shop, Vec<ProductId>) {
        let mut shop = Shop::default();
        let ids = shop.seed(default_catalog()).unwrap();
        (shop, ids)
    }

    #[test]
    fn seed_registers_every_item() {
        let (shop, ids) = seeded_shop();
        assert_eq!(ids.len(), 4);
        assert_eq!(shop.catalog().len(), 4);
        assert_eq!(shop.listing().len(), 4);
    }

    #[test]
    fn seed_stops_at_invalid_item() {
        let mut shop = Shop::default();
        let items = vec![
            NewProduct::new("Mouse", "Electronics", Money::from_cents(3000), 50),
            NewProduct::new("Ghost", "Electronics", Money::from_cents(3000), 0),
        ];
        assert!(matches!(shop.seed(items), Err(DomainError::InvalidArgument(_))));
        assert_eq!(shop.catalog().len(), 1);
    }

    #[test]
    fn config_sets_id_bases() {
        let config = ShopConfig {
            product_id_base: 1,
            order_id_base: 7,
            ..ShopConfig::default()
        };
        let mut shop = Shop::new(&config);
        let product = shop.add_product(default_catalog().remove(0)).unwrap();
        let order = shop.open_order();
        assert_eq!(product, ProductId::new(1));
        assert_eq!(order, OrderId::new(7));
    }

    #[test]
    fn operations_on_deleted_order_fail_as_missing() {
        let (mut shop, ids) = seeded_shop();
        let order = shop.open_order();
        shop.delete_order(order).unwrap();

        let missing = DomainError::OrderMissing(order);
        assert_eq!(shop.add_to_order(order, ids[2], 1), Err(missing.clone()));
        assert_eq!(shop.total_price(order), Err(missing.clone()));
        assert_eq!(shop.clear_order(order), Err(missing.clone()));
        assert_eq!(shop.checkout(order), Err(missing));
        assert_eq!(shop.catalog().product(ids[2]).unwrap().quantity(), 50);
    }

    #[test]
    fn open_order_with_reserves_every_item() {
        let (mut shop, ids) = seeded_shop();

        let order = shop.open_order_with([(ids[0], 1), (ids[2], 5)]).unwrap();

        let cart = shop.cart(order).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart[0].name, "Laptop");
        assert_eq!(cart[1].quantity, 5);
        assert_eq!(shop.catalog().product(ids[2]).unwrap().quantity(), 45);
        assert_eq!(shop.total_price(order).unwrap().to_string(), "$1,350.00");
    }

    #[test]
    fn open_order_with_failing_item_changes_nothing() {
        let (mut shop, ids) = seeded_shop();
        let before = shop.listing();

        let err = shop
            .open_order_with([(ids[2], 5), (ids[3], 6)])
            .unwrap_err();

        assert_eq!(err, DomainError::insufficient(6, 5));
        assert!(shop.orders().is_empty());
        assert_eq!(shop.catalog().len(), 4);
        assert_eq!(shop.listing(), before);

        // Neither id counter moved.
        let order = shop.open_order();
        assert_eq!(order, OrderId::new(10_000));
        let unit = shop.add_to_order(order, ids[2], 1).unwrap();
        assert_eq!(unit, ProductId::new(100_004));
    }

    #[test]
    fn open_order_with_no_items_is_an_empty_order() {
        let (mut shop, _) = seeded_shop();
        let order = shop.open_order_with(Vec::<(ProductId, u32)>::new()).unwrap();
        assert!(shop.order(order).unwrap().is_empty());
    }

    #[test]
    fn total_price_sums_lines() {
        let (mut shop, ids) = seeded_shop();
        let order = shop.open_order();
        shop.add_to_order(order, ids[0], 1).unwrap();
        shop.add_to_order(order, ids[2], 5).unwrap();

        assert_eq!(shop.total_price(order).unwrap().to_string(), "$1,350.00");
        assert_eq!(shop.cart(order).unwrap().len(), 2);
    }
}
