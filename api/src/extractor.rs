use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use kernel::model::{account::Account, auth::SessionToken, id::AccountId};
use registry::AppRegistry;
use shared::error::AppResult;
use std::convert::Infallible;
use tower_cookies::{Cookie, Cookies, Key};

pub const SESSION_COOKIE: &str = "remember_token";
pub const LOGIN_PATH: &str = "/login";

// ログイン済みのリクエストでのみ取り出せる。未ログインならログイン画面へリダイレクトする
pub struct AuthorizedAccount {
    pub session_token: SessionToken,
    pub account: Account,
}

impl AuthorizedAccount {
    pub fn id(&self) -> AccountId {
        self.account.account_id
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedAccount {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        match resolve_session(parts, registry).await {
            Ok(Some(authorized)) => Ok(authorized),
            Ok(None) => Err(Redirect::to(LOGIN_PATH).into_response()),
            Err(e) => Err(e.into_response()),
        }
    }
}

/// The account behind the request's session, if any.
///
/// Never rejects: anonymous requests and session store failures both
/// resolve to `None`, so public pages stay available.
pub struct CurrentAccount(pub Option<Account>);

#[async_trait]
impl FromRequestParts<AppRegistry> for CurrentAccount {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        match resolve_session(parts, registry).await {
            Ok(authorized) => Ok(Self(authorized.map(|a| a.account))),
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "could not resolve the session; continuing as anonymous"
                );
                Ok(Self(None))
            }
        }
    }
}

async fn resolve_session(
    parts: &mut Parts,
    registry: &AppRegistry,
) -> AppResult<Option<AuthorizedAccount>> {
    let cookies = match Cookies::from_request_parts(parts, registry).await {
        Ok(cookies) => cookies,
        Err((_, reason)) => {
            tracing::warn!(reason, "cookie manager layer is not installed");
            return Ok(None);
        }
    };
    let Some(session_token) = read_session_cookie(&cookies, registry) else {
        return Ok(None);
    };

    let Some(account_id) = registry
        .session_repository()
        .fetch_account_id(&session_token)
        .await?
    else {
        return Ok(None);
    };

    // セッションが残っていてもアカウントが消えていれば未ログイン扱い
    let account = registry.account_repository().find_by_id(account_id).await?;
    Ok(account.map(|account| AuthorizedAccount {
        session_token,
        account,
    }))
}

fn session_key(registry: &AppRegistry) -> Key {
    Key::from(registry.auth_config().session_secret.as_slice())
}

pub fn read_session_cookie(cookies: &Cookies, registry: &AppRegistry) -> Option<SessionToken> {
    cookies
        .signed(&session_key(registry))
        .get(SESSION_COOKIE)
        .map(|cookie| SessionToken(cookie.value().to_string()))
}

pub fn write_session_cookie(cookies: &Cookies, registry: &AppRegistry, token: &SessionToken) {
    let max_age = i64::try_from(registry.auth_config().ttl).unwrap_or(i64::MAX);
    let mut cookie = Cookie::new(SESSION_COOKIE, token.as_str().to_string());
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::seconds(max_age));
    cookies.signed(&session_key(registry)).add(cookie);
}

pub fn remove_session_cookie(cookies: &Cookies, registry: &AppRegistry) {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookies.signed(&session_key(registry)).remove(cookie);
}
