use anyhow::Context;

use shopfront::{Shop, ShopConfig, default_catalog};

fn main() -> anyhow::Result<()> {
    let config = ShopConfig::from_env().context("failed to load shopfront configuration")?;
    shopfront_observability::init(&config.log);

    let mut shop = Shop::new(&config);
    shop.seed(default_catalog())
        .context("failed to seed the default catalog")?;

    for row in shop.listing().rows() {
        tracing::info!(
            position = row.position,
            product_id = %row.product_id,
            name = %row.name,
            category = %row.category,
            price = %row.price,
            quantity = row.quantity,
            "available"
        );
    }

    Ok(())
}
