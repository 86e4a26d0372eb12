use crate::redis::{
    model::{RedisKey, RedisValue},
    RedisClient,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{CreateSession, SessionToken},
    id::AccountId,
};
use kernel::repository::session::SessionRepository;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(new)]
pub struct SessionRepositoryImpl {
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl SessionRepository for SessionRepositoryImpl {
    async fn create(&self, event: CreateSession) -> AppResult<SessionToken> {
        let (key, value) = from(event);
        self.kv.set_ex(&key, &value, self.ttl).await?;
        Ok(key.into())
    }

    async fn fetch_account_id(&self, token: &SessionToken) -> AppResult<Option<AccountId>> {
        let key: SessionKey = token.into();
        self.kv
            .get(&key)
            .await
            .map(|value| value.map(SessionAccountId::into_inner))
    }

    async fn delete(&self, token: SessionToken) -> AppResult<()> {
        let key: SessionKey = (&token).into();
        self.kv.delete(&key).await
    }
}

pub struct SessionKey(String);
pub struct SessionAccountId(AccountId);

impl SessionAccountId {
    pub fn into_inner(self) -> AccountId {
        self.0
    }
}

fn from(event: CreateSession) -> (SessionKey, SessionAccountId) {
    (
        SessionKey(SessionToken::generate().0),
        SessionAccountId(event.account_id),
    )
}

impl From<SessionKey> for SessionToken {
    fn from(key: SessionKey) -> Self {
        Self(key.0)
    }
}

impl From<&SessionToken> for SessionKey {
    fn from(token: &SessionToken) -> Self {
        Self(token.0.clone())
    }
}

impl RedisKey for SessionKey {
    type Value = SessionAccountId;

    fn inner(&self) -> String {
        format!("session:{}", self.0)
    }
}

impl RedisValue for SessionAccountId {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for SessionAccountId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(value.parse::<AccountId>()?))
    }
}
