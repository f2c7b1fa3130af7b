use cables_shop_app::{
    database::Db,
    domain::catalog::{CatalogService, PgCatalogService, records::ProductUuid},
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RestockProductArgs {

    #[arg(long)]
    product_uuid: Uuid,

    /// Units to add
    #[arg(long)]
    units: u32,
}

pub(crate) async fn run(args: RestockProductArgs, db: Db) -> Result<(), String> {
    let product = PgCatalogService::new(db)
        .restock_product(ProductUuid::from_uuid(args.product_uuid), args.units)
        .await
        .map_err(|error| format!("failed to restock product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("units_in_stock: {}", product.units_in_stock);

    Ok(())
}
