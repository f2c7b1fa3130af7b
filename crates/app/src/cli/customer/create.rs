use cables_shop_app::{
    auth::{AuthService, PgAuthService},
    database::Db,
    domain::customers::{
        CustomersService, PgCustomersService,
        data::NewCustomer,
        records::CustomerUuid,
    },
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateCustomerArgs {

    #[arg(long)]
    email: String,

    #[arg(long, default_value = "")]
    first_name: String,

    #[arg(long, default_value = "")]
    last_name: String,

    #[arg(long)]
    phone: Option<String>,

    /// Optional customer UUID; generated when omitted
    #[arg(long)]
    customer_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateCustomerArgs, db: Db) -> Result<(), String> {
    let customer = PgCustomersService::new(db.clone())
        .register(NewCustomer {
            uuid: args
                .customer_uuid
                .map_or_else(CustomerUuid::new, CustomerUuid::from_uuid),
            email: args.email,
            first_name: args.first_name,
            last_name: args.last_name,
            phone: args.phone,
        })
        .await
        .map_err(|error| format!("failed to create customer: {error}"))?;

    let issued = PgAuthService::new(db)
        .issue_api_token(customer.uuid)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("customer_uuid: {}", customer.uuid);
    println!("email: {}", customer.email);
    println!("token_uuid: {}", issued.metadata.uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
