use cables_shop_app::{
    auth::{AuthService, PgAuthService},
    database::Db,
    domain::customers::records::CustomerUuid,
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {

    /// Customer UUID whose tokens should be listed
    #[arg(long)]
    customer_uuid: Uuid,
}

pub(crate) async fn run(args: ListTokensArgs, db: Db) -> Result<(), String> {
    let tokens = PgAuthService::new(db)
        .list_api_tokens(CustomerUuid::from_uuid(args.customer_uuid))
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found for customer {}", args.customer_uuid);
        return Ok(());
    }

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("token_version: {}", token.version.as_i16());
        println!("created_at: {}", token.created_at);
        println!(
            "last_used_at: {}",
            token
                .last_used_at
                .map_or_else(|| "never".to_string(), |value| value.to_string())
        );
        println!(
            "revoked_at: {}",
            token
                .revoked_at
                .map_or_else(|| "active".to_string(), |value| value.to_string())
        );
        println!();
    }

    Ok(())
}
