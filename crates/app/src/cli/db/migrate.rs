use cables_shop_app::database::{self, Db};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {}

pub(crate) async fn run(_args: MigrateArgs, db: Db) -> Result<(), String> {
    database::migrate(db.pool())
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}
