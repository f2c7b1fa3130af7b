use cables_shop_app::{
    database::Db,
    domain::catalog::{CatalogService, PgCatalogService, data::NewCategory, records::CategoryUuid},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {

    /// Cable type name, e.g. "HDMI cable"
    #[arg(long)]
    name: String,

    /// Plural form used for listings
    #[arg(long)]
    name_plural: String,

    #[arg(long)]
    slug: String,

    #[arg(long)]
    description: Option<String>,

    /// Photo path relative to the media root
    #[arg(long)]
    photo: Option<String>,
}

pub(crate) async fn run(args: CreateCategoryArgs, db: Db) -> Result<(), String> {
    let category = PgCatalogService::new(db)
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: args.name,
            name_plural: args.name_plural,
            slug: args.slug,
            description: args.description,
            photo: args.photo,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_slug: {}", category.slug);

    Ok(())
}
