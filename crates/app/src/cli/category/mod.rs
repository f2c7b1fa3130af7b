use cables_shop_app::database::Db;
use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct CategoryCommand {
    #[command(subcommand)]
    command: CategorySubcommand,
}

#[derive(Debug, Subcommand)]
enum CategorySubcommand {
    Create(create::CreateCategoryArgs),
}

pub(crate) async fn run(command: CategoryCommand, db: Db) -> Result<(), String> {
    match command.command {
        CategorySubcommand::Create(args) => create::run(args, db).await,
    }
}
