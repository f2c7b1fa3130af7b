//! Auth service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenUuid, AuthServiceError, BearerToken, IssuedApiToken,
        models::NewApiToken, repository::PgAuthRepository,
    },
    database::Db,
    domain::customers::records::CustomerUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<CustomerUuid, AuthServiceError> {
        let bearer: BearerToken = bearer_token.parse().or(Err(AuthServiceError::NotFound))?;

        let mut tx = self.db.begin().await?;

        let token = self
            .repository
            .find_active_api_token(&mut tx, bearer.uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != bearer.version || !bearer.verifies(token.customer_uuid, &token.token_hash)
        {
            return Err(AuthServiceError::NotFound);
        }

        self.repository.touch_last_used(&mut tx, bearer.uuid).await?;

        tx.commit().await?;

        Ok(token.customer_uuid)
    }

    async fn issue_api_token(
        &self,
        customer: CustomerUuid,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let bearer = BearerToken::generate(ApiTokenUuid::new());

        let mut tx = self.db.begin().await?;

        let metadata = self
            .repository
            .create_api_token(
                &mut tx,
                NewApiToken {
                    uuid: bearer.uuid,
                    customer_uuid: customer,
                    version: bearer.version,
                    token_hash: bearer.verifier(customer),
                },
            )
            .await?;

        tx.commit().await?;

        Ok(IssuedApiToken {
            token: bearer.to_string(),
            metadata,
        })
    }

    async fn list_api_tokens(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let tokens = self.repository.list_api_tokens(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(tokens)
    }

    async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self.repository.revoke_api_token(&mut tx, token).await?;

        tx.commit().await?;

        Ok(revoked.is_some())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the customer it was issued for.
    ///
    /// Malformed, unknown, revoked and forged tokens all yield
    /// [`AuthServiceError::NotFound`].
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<CustomerUuid, AuthServiceError>;

    /// Issue a new API token. The raw token is only ever returned here.
    async fn issue_api_token(
        &self,
        customer: CustomerUuid,
    ) -> Result<IssuedApiToken, AuthServiceError>;

    async fn list_api_tokens(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError>;

    /// Revoke a token. Returns `true` if the token was active.
    async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_its_customer() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("token@example.com").await?;

        let issued = ctx.auth.issue_api_token(customer.uuid).await?;

        let authenticated = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(authenticated, customer.uuid);

        let tokens = ctx.auth.list_api_tokens(customer.uuid).await?;

        assert_eq!(tokens.len(), 1);
        assert!(
            tokens.first().is_some_and(|t| t.last_used_at.is_some()),
            "authentication should record last use"
        );

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_no_longer_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("revoked@example.com").await?;

        let issued = ctx.auth.issue_api_token(customer.uuid).await?;

        assert!(ctx.auth.revoke_api_token(issued.metadata.uuid).await?);
        assert!(
            !ctx.auth.revoke_api_token(issued.metadata.uuid).await?,
            "second revoke should report the token as already inactive"
        );

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("tamper@example.com").await?;

        let issued = ctx.auth.issue_api_token(customer.uuid).await?;

        let (id, _) = issued.token.split_once('.').ok_or("token should contain a dot")?;
        let forged = format!("{id}.{}", "00".repeat(32));

        let result = ctx.auth.authenticate_bearer(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn issuing_for_unknown_customer_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.issue_api_token(CustomerUuid::new()).await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }
}
