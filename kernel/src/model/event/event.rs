use crate::model::id::{AccountId, EventId};
use chrono::{NaiveDate, NaiveTime};
use derive_new::new;

#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub name: String,
    pub organizer_id: Option<AccountId>,
    pub description: String,
    pub event_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub address: String,
    pub price: f64,
    // None の場合は DEFAULT_IMAGE_FILE を使う
    pub image_file: Option<String>,
}

#[derive(new, Debug, Clone, Copy)]
pub struct AddSpeaker {
    pub event_id: EventId,
    pub account_id: AccountId,
}
