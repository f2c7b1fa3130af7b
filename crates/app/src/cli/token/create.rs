use cables_shop_app::{
    auth::{AuthService, PgAuthService},
    database::Db,
    domain::customers::records::CustomerUuid,
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {

    /// Customer UUID that should own the token
    #[arg(long)]
    customer_uuid: Uuid,
}

pub(crate) async fn run(args: CreateTokenArgs, db: Db) -> Result<(), String> {
    let issued = PgAuthService::new(db)
        .issue_api_token(CustomerUuid::from_uuid(args.customer_uuid))
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("customer_uuid: {}", issued.metadata.customer_uuid);
    println!("token_version: {}", issued.metadata.version.as_i16());
    println!("token_created_at: {}", issued.metadata.created_at);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
