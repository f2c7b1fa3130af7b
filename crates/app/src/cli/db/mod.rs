use cables_shop_app::database::Db;
use clap::{Args, Subcommand};

mod migrate;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),
}

pub(crate) async fn run(command: DbCommand, db: Db) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate(args) => migrate::run(args, db).await,
    }
}
