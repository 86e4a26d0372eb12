use crate::model::{
    auth::{CreateSession, SessionToken},
    id::AccountId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, event: CreateSession) -> AppResult<SessionToken>;
    async fn fetch_account_id(&self, token: &SessionToken) -> AppResult<Option<AccountId>>;
    async fn delete(&self, token: SessionToken) -> AppResult<()>;
}
