use super::{
    auth::build_auth_routers, event::build_event_routers, health::build_health_check_routers,
};
use axum::Router;
use registry::AppRegistry;
use tower_cookies::CookieManagerLayer;

pub fn routes() -> Router<AppRegistry> {
    Router::new()
        .merge(build_health_check_routers())
        .merge(build_event_routers())
        .merge(build_auth_routers())
        .layer(CookieManagerLayer::new())
}
