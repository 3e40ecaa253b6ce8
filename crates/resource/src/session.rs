//! Login and logout against the backend session.

use core_types::{Session, SessionUser};
use serde::{Deserialize, Serialize};

use crate::client::csrf_token;
use crate::cookie::{CSRF_COOKIE, CSRF_HEADER};
use crate::transport::{ApiRequest, CONTENT_TYPE, JSON_CONTENT_TYPE, Method, Transport};
use crate::Result;

pub const LOGIN_PATH: &str = "/api/login";
pub const LOGOUT_PATH: &str = "/api/logout";

/// Username and password for `/api/login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The backend answers login either with the user or with `{"user": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LoginReply {
    Wrapped { user: SessionUser },
    Bare(SessionUser),
}

/// Log in and return the authenticated session.
pub async fn login<T: Transport>(transport: &T, credentials: &Credentials) -> Result<Session> {
    let request = ApiRequest::new(Method::Post, LOGIN_PATH)
        .header(CSRF_HEADER, csrf_token(transport))
        .json(serde_json::to_value(credentials)?);

    let response = transport.send(request).await?.error_for_status()?;
    let user = match response.json::<LoginReply>()? {
        LoginReply::Wrapped { user } | LoginReply::Bare(user) => user,
    };
    log::info!("Logged in as {}", user.username);
    Ok(Session::Authenticated(user))
}

/// Log out.
///
/// The CSRF cookie is dropped and the session reset even when the request
/// fails; the request's own outcome is returned.
pub async fn logout<T: Transport>(transport: &T, session: &mut Session) -> Result<()> {
    let request = ApiRequest::new(Method::Post, LOGOUT_PATH)
        .header(CSRF_HEADER, csrf_token(transport))
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

    let result = match transport.send(request).await {
        Ok(response) => response.error_for_status().map(|_| ()),
        Err(e) => Err(e),
    };
    if let Err(e) = &result {
        log::warn!("Logout request failed: {e}");
    }

    transport.remove_cookie(CSRF_COOKIE);
    *session = Session::Anonymous;
    result
}
