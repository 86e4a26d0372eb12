pub mod account;
pub mod event;
