use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::{event::show_event, home::show_home};

pub fn build_event_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/", get(show_home))
        .route("/evento/:event_id", get(show_event))
}
