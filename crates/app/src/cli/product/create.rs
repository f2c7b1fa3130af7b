use cables_shop_app::{
    database::Db,
    domain::catalog::{
        CatalogService, PgCatalogService,
        data::NewProduct,
        records::{CategoryUuid, ProductUuid},
    },
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {

    #[arg(long)]
    category_uuid: Uuid,

    #[arg(long)]
    name: String,

    #[arg(long)]
    slug: String,

    #[arg(long)]
    description: Option<String>,

    /// Cable length in centimetres
    #[arg(long)]
    length_cm: u32,

    /// Price in minor currency units
    #[arg(long)]
    price: u64,

    #[arg(long, default_value_t = 0)]
    units_in_stock: u32,

    /// Create the product hidden from the catalog
    #[arg(long)]
    hidden: bool,

    /// Photo path relative to the media root
    #[arg(long)]
    photo: Option<String>,
}

pub(crate) async fn run(args: CreateProductArgs, db: Db) -> Result<(), String> {
    let product = PgCatalogService::new(db)
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            category_uuid: CategoryUuid::from_uuid(args.category_uuid),
            name: args.name,
            slug: args.slug,
            description: args.description,
            length_cm: args.length_cm,
            price: args.price,
            units_in_stock: args.units_in_stock,
            for_sale: !args.hidden,
            photo: args.photo,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_slug: {}", product.slug);
    println!("units_in_stock: {}", product.units_in_stock);

    Ok(())
}
