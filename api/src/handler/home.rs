use crate::{extractor::CurrentAccount, model::event::EventSummaryView, view};
use axum::{extract::State, response::Html};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_home(
    CurrentAccount(current): CurrentAccount,
    State(registry): State<AppRegistry>,
) -> AppResult<Html<String>> {
    let events: Vec<EventSummaryView> = registry
        .event_repository()
        .find_all()
        .await?
        .into_iter()
        .map(EventSummaryView::from)
        .collect();

    Ok(Html(view::home_page(current.as_ref(), &events)))
}
