use crate::{extractor::CurrentAccount, model::event::EventView, view};
use axum::{
    extract::{Path, State},
    response::Html,
};
use kernel::model::id::EventId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// 数値でない ID も存在しないイベントと同様に 404 とする
pub async fn show_event(
    CurrentAccount(current): CurrentAccount,
    Path(event_id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Html<String>> {
    let event_id: EventId = event_id
        .parse()
        .map_err(|_| AppError::EntityNotFound(format!("event {event_id} not found")))?;

    registry
        .event_repository()
        .find_by_id(event_id)
        .await
        .and_then(|event| match event {
            Some(event) => Ok(Html(view::event_page(
                current.as_ref(),
                &EventView::from(event),
            ))),
            None => Err(AppError::EntityNotFound(format!(
                "event {event_id} not found"
            ))),
        })
}
