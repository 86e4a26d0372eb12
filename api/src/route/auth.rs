use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::auth::{login, login_form, logout, register, register_form};

pub fn build_auth_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", get(logout))
}
