use crate::model::id::{AccountId, EventId};
use chrono::{NaiveDate, NaiveTime};

pub mod event;

pub const DEFAULT_IMAGE_FILE: &str = "default.jpg";

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_id: EventId,
    pub name: String,
    pub organizer: Option<EventOrganizer>,
    pub description: String,
    pub event_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub address: String,
    pub price: f64,
    pub image_file: String,
    pub speakers: Vec<EventSpeaker>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOrganizer {
    pub account_id: AccountId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSpeaker {
    pub account_id: AccountId,
    pub username: String,
}
