use cables_shop_app::database::Db;
use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct CustomerCommand {
    #[command(subcommand)]
    command: CustomerSubcommand,
}

#[derive(Debug, Subcommand)]
enum CustomerSubcommand {
    /// Register a customer and issue their first API token
    Create(create::CreateCustomerArgs),
}

pub(crate) async fn run(command: CustomerCommand, db: Db) -> Result<(), String> {
    match command.command {
        CustomerSubcommand::Create(args) => create::run(args, db).await,
    }
}
