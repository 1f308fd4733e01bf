use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::guard::{self, Access};

/// Authenticated session context extracted from the bearer token
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            email: claims.email,
        }
    }
}

/// Attach a Session extension when the request carries a valid token.
/// A missing or invalid token is not an error here; guarded paths are
/// rejected downstream by [`enforce_guard`].
pub async fn attach_session(mut request: Request, next: Next) -> Response {
    if let Some(session) = session_from_headers(request.headers()) {
        request.extensions_mut().insert(session);
    }
    next.run(request).await
}

/// Evaluate the route-guard rule table in front of the handler dispatch.
/// Page routes redirect to sign-in; API routes are rejected with 401.
pub async fn enforce_guard(request: Request, next: Next) -> Response {
    let has_session = request.extensions().get::<Session>().is_some();
    match guard::evaluate(request.uri().path(), request.method(), has_session) {
        Access::Allow => next.run(request).await,
        Access::Deny => {
            if guard::is_page_path(request.uri().path()) {
                Redirect::to("/auth/signin").into_response()
            } else {
                ApiError::unauthorized("Authentication required").into_response()
            }
        }
    }
}

fn session_from_headers(headers: &HeaderMap) -> Option<Session> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    auth::verify_token(token).ok().map(Session::from)
}
