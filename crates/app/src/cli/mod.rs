use cables_shop_app::database::{self, Db};
use clap::{Parser, Subcommand};

mod category;
mod customer;
mod db;
mod product;
mod token;

#[derive(Debug, Parser)]
#[command(name = "cables-shop-app", about = "Cables Shop CLI", long_about = None)]
pub(crate) struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Customer(customer::CustomerCommand),
    Token(token::TokenCommand),
    Category(category::CategoryCommand),
    Product(product::ProductCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let database_url = self
            .database_url
            .ok_or("DATABASE_URL is not set; pass --database-url or export it")?;

        let handle = database::connect(&database_url)
            .await
            .map(Db::new)
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        match self.command {
            Commands::Db(command) => db::run(command, handle).await,
            Commands::Customer(command) => customer::run(command, handle).await,
            Commands::Token(command) => token::run(command, handle).await,
            Commands::Category(command) => category::run(command, handle).await,
            Commands::Product(command) => product::run(command, handle).await,
        }
    }
}
