use crate::model::{
    event::{
        event::{AddSpeaker, CreateEvent},
        Event,
    },
    id::EventId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Event>>;
    async fn find_all(&self) -> AppResult<Vec<Event>>;
    async fn create(&self, event: CreateEvent) -> AppResult<EventId>;
    // 既に登壇者として登録済みの場合は何もしない
    async fn add_speaker(&self, event: AddSpeaker) -> AppResult<()>;
}
