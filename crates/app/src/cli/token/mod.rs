use cables_shop_app::database::Db;
use clap::{Args, Subcommand};

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Create(create::CreateTokenArgs),
    List(list::ListTokensArgs),
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand, db: Db) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Create(args) => create::run(args, db).await,
        TokenSubcommand::List(args) => list::run(args, db).await,
        TokenSubcommand::Revoke(args) => revoke::run(args, db).await,
    }
}
