// src/integrations/backend/identity.rs
//
// Identity provider seam used by SessionService

use async_trait::async_trait;

use super::client::{BackendClient, SignUpOutcome};
use crate::domain::{Identity, Session};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session>;
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpOutcome>;
    async fn refresh(&self, refresh_token: &str) -> AppResult<Session>;
    async fn get_user(&self, access_token: &str) -> AppResult<Identity>;
    async fn sign_out(&self, access_token: &str) -> AppResult<()>;
}

#[async_trait]
impl IdentityProvider for BackendClient {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        self.sign_in_with_password(email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpOutcome> {
        BackendClient::sign_up(self, email, password).await
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<Session> {
        self.refresh_session(refresh_token).await
    }

    async fn get_user(&self, access_token: &str) -> AppResult<Identity> {
        BackendClient::get_user(self, access_token).await
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        BackendClient::sign_out(self, access_token).await
    }
}
