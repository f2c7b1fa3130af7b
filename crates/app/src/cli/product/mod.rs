use cables_shop_app::database::Db;
use clap::{Args, Subcommand};

mod create;
mod restock;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(create::CreateProductArgs),
    /// Add units to a product's stock
    Restock(restock::RestockProductArgs),
}

pub(crate) async fn run(command: ProductCommand, db: Db) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => create::run(args, db).await,
        ProductSubcommand::Restock(args) => restock::run(args, db).await,
    }
}
