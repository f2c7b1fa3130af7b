//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        addresses::repository::PgAddressesRepository,
        customers::{
            data::{NewCustomer, Profile, ProfileUpdate, normalize_phone},
            errors::CustomersServiceError,
            records::{CustomerRecord, CustomerUuid},
            repository::PgCustomersRepository,
        },
        orders::repositories::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    customers: PgCustomersRepository,
    addresses: PgAddressesRepository,
    orders: PgOrdersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            customers: PgCustomersRepository::new(),
            addresses: PgAddressesRepository::new(),
            orders: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn register(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let email = customer.email.trim().to_lowercase();

        if email.is_empty() {
            return Err(CustomersServiceError::MissingRequiredData);
        }

        let customer = NewCustomer {
            email,
            first_name: customer.first_name.trim().to_string(),
            last_name: customer.last_name.trim().to_string(),
            phone: normalize_phone(customer.phone.as_deref()),
            ..customer
        };

        let mut tx = self.db.begin().await?;

        let created = self.customers.create_customer(&mut tx, customer).await?;

        self.orders
            .create_cart_if_absent(&mut tx, created.uuid)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_profile(&self, customer: CustomerUuid) -> Result<Profile, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .customers
            .find_customer(&mut tx, customer)
            .await?
            .ok_or(CustomersServiceError::NotFound)?;

        let primary_address = self.addresses.get_primary(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(Profile {
            customer: record,
            primary_address,
        })
    }

    async fn update_profile(
        &self,
        customer: CustomerUuid,
        update: ProfileUpdate,
    ) -> Result<Profile, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        self.customers
            .lock_customer(&mut tx, customer)
            .await?
            .ok_or(CustomersServiceError::NotFound)?;

        let record = self
            .customers
            .update_contact(&mut tx, customer, update.contact.normalized())
            .await?;

        let primary_address = match update.address.filter(|address| !address.is_blank()) {
            Some(address) => Some(
                self.addresses
                    .set_primary(&mut tx, customer, &address)
                    .await?,
            ),
            None => self.addresses.get_primary(&mut tx, customer).await?,
        };

        tx.commit().await?;

        Ok(Profile {
            customer: record,
            primary_address,
        })
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Creates a customer together with their empty cart.
    async fn register(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Retrieve the customer and their primary shipping address.
    async fn get_profile(&self, customer: CustomerUuid) -> Result<Profile, CustomersServiceError>;

    /// Update contact details and, when a non-blank address is given, make it
    /// the primary shipping address.
    ///
    /// A phone or email already used by someone else yields
    /// [`CustomersServiceError::DuplicateContact`] and leaves the profile
    /// untouched.
    async fn update_profile(
        &self,
        customer: CustomerUuid,
        update: ProfileUpdate,
    ) -> Result<Profile, CustomersServiceError>;
}
