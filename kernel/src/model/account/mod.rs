use crate::model::{id::AccountId, role::Role};
pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub account_id: AccountId,
    pub username: String,
    pub email: String,
    pub role: Role,
}
