use kernel::model::{account::Account, id::AccountId, role::Role};
use shared::error::AppError;
use sqlx::FromRow;

#[derive(FromRow)]
pub struct AccountRow {
    pub account_id: AccountId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(value: AccountRow) -> Result<Self, Self::Error> {
        let AccountRow {
            account_id,
            username,
            email,
            password_hash: _,
            role,
        } = value;
        let role = role.parse::<Role>().map_err(|e| {
            AppError::ConversionEntityError(format!("アカウント {account_id} のロール {role}: {e}"))
        })?;
        Ok(Account {
            account_id,
            username,
            email,
            role,
        })
    }
}
