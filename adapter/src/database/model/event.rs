use chrono::{NaiveDate, NaiveTime};
use kernel::model::{
    event::{Event, EventOrganizer, EventSpeaker},
    id::{AccountId, EventId},
};
use sqlx::FromRow;

// 主催者は LEFT JOIN で取得するため、主催者なしの場合は organizer_* が None になる
#[derive(FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub name: String,
    pub organizer_id: Option<AccountId>,
    pub organizer_name: Option<String>,
    pub description: String,
    pub event_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub address: String,
    pub price: f64,
    pub image_file: String,
}

impl EventRow {
    pub fn into_event(self, speakers: Vec<EventSpeaker>) -> Event {
        let EventRow {
            event_id,
            name,
            organizer_id,
            organizer_name,
            description,
            event_type,
            start_date,
            end_date,
            start_time,
            address,
            price,
            image_file,
        } = self;
        let organizer = organizer_id
            .zip(organizer_name)
            .map(|(account_id, username)| EventOrganizer {
                account_id,
                username,
            });
        Event {
            event_id,
            name,
            organizer,
            description,
            event_type,
            start_date,
            end_date,
            start_time,
            address,
            price,
            image_file,
            speakers,
        }
    }
}

#[derive(FromRow)]
pub struct EventSpeakerRow {
    pub event_id: EventId,
    pub account_id: AccountId,
    pub username: String,
}

impl From<EventSpeakerRow> for EventSpeaker {
    fn from(value: EventSpeakerRow) -> Self {
        let EventSpeakerRow {
            event_id: _,
            account_id,
            username,
        } = value;
        EventSpeaker {
            account_id,
            username,
        }
    }
}
