use crate::model::{
    account::{event::CreateAccount, Account},
    id::AccountId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    // ユーザー名からアカウントを取得する
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;
    // セッションに紐づく ID からアカウントを取得する（削除済みなら None）
    async fn find_by_id(&self, account_id: AccountId) -> AppResult<Option<Account>>;
    // アカウントを作成する。ユーザー名・メールアドレスの重複はエラーになる
    async fn create(&self, event: CreateAccount) -> AppResult<Account>;
    // ユーザー名とパスワードを検証する。失敗理由は区別せず UnauthenticatedError を返す
    async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<Account>;
}
