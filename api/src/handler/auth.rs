use crate::{
    extractor::{remove_session_cookie, write_session_cookie, AuthorizedAccount, LOGIN_PATH},
    model::account::{LoginRequest, RegisterRequest},
    view,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use garde::Validate;
use kernel::model::{account::event::CreateAccount, auth::CreateSession};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use tower_cookies::Cookies;

pub async fn login_form() -> Html<String> {
    Html(view::login_page(None))
}

pub async fn login(
    State(registry): State<AppRegistry>,
    cookies: Cookies,
    Form(req): Form<LoginRequest>,
) -> AppResult<Response> {
    let account = match registry
        .account_repository()
        .verify_credentials(&req.username, &req.password)
        .await
    {
        Ok(account) => account,
        // どの項目が誤っていたかは伝えない
        Err(AppError::UnauthenticatedError) => {
            tracing::info!(username = %req.username, "login rejected");
            return Ok(Html(view::login_page(Some(view::INVALID_CREDENTIALS))).into_response());
        }
        Err(e) => return Err(e),
    };

    let session_token = registry
        .session_repository()
        .create(CreateSession::new(account.account_id))
        .await?;
    write_session_cookie(&cookies, &registry, &session_token);
    tracing::info!(account_id = %account.account_id, "logged in");

    Ok(Redirect::to("/").into_response())
}

pub async fn register_form() -> Html<String> {
    Html(view::register_page(None))
}

pub async fn register(
    State(registry): State<AppRegistry>,
    Form(req): Form<RegisterRequest>,
) -> AppResult<Response> {
    if let Err(report) = req.validate(&()) {
        return Ok(rejected_registration(
            StatusCode::BAD_REQUEST,
            &AppError::from(report),
        ));
    }
    let create_account = match CreateAccount::try_from(req) {
        Ok(create_account) => create_account,
        Err(e) => return Ok(rejected_registration(StatusCode::BAD_REQUEST, &e)),
    };

    match registry.account_repository().create(create_account).await {
        Ok(account) => {
            tracing::info!(account_id = %account.account_id, "account registered");
            Ok(Redirect::to(LOGIN_PATH).into_response())
        }
        Err(e @ (AppError::DuplicateUsername(_) | AppError::DuplicateEmail(_))) => {
            Ok(rejected_registration(StatusCode::CONFLICT, &e))
        }
        Err(e) => Err(e),
    }
}

fn rejected_registration(status: StatusCode, error: &AppError) -> Response {
    let message = match error {
        AppError::DuplicateUsername(_) => "Username already taken".to_string(),
        AppError::DuplicateEmail(_) => "Email already registered".to_string(),
        e => e.to_string(),
    };
    (status, Html(view::register_page(Some(&message)))).into_response()
}

pub async fn logout(
    authorized: AuthorizedAccount,
    State(registry): State<AppRegistry>,
    cookies: Cookies,
) -> AppResult<Redirect> {
    let account_id = authorized.id();
    registry
        .session_repository()
        .delete(authorized.session_token)
        .await?;
    remove_session_cookie(&cookies, &registry);
    tracing::info!(account_id = %account_id, "logged out");
    Ok(Redirect::to(LOGIN_PATH))
}
