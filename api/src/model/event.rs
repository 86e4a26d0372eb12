use kernel::model::{event::Event, id::EventId};

// 画面表示用に整形したイベント
#[derive(Debug)]
pub struct EventView {
    pub id: EventId,
    pub name: String,
    pub organizer: Option<String>,
    pub description: String,
    pub event_type: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub address: String,
    pub price: String,
    pub image_file: String,
    pub speakers: Vec<String>,
}

impl From<Event> for EventView {
    fn from(value: Event) -> Self {
        let Event {
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
        } = value;
        Self {
            id: event_id,
            name,
            organizer: organizer.map(|o| o.username),
            description,
            event_type,
            start_date: start_date.format("%Y-%m-%d").to_string(),
            end_date: end_date.format("%Y-%m-%d").to_string(),
            start_time: start_time.format("%H:%M").to_string(),
            address,
            price: format!("{price:.2}"),
            image_file,
            speakers: speakers.into_iter().map(|s| s.username).collect(),
        }
    }
}

#[derive(Debug)]
pub struct EventSummaryView {
    pub id: EventId,
    pub name: String,
    pub event_type: String,
    pub start_date: String,
}

impl From<Event> for EventSummaryView {
    fn from(value: Event) -> Self {
        Self {
            id: value.event_id,
            name: value.name,
            event_type: value.event_type,
            start_date: value.start_date.format("%Y-%m-%d").to_string(),
        }
    }
}
