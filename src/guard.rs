//! Route guard: a pure predicate over (path, method, session-presence).
//!
//! Kept free of framework hooks so the rule table can be read and tested
//! on its own; enforcement is wired up in [`crate::middleware`].

use axum::http::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Evaluate the rule table for one inbound request, first match wins:
///
/// 1. path under `/create` -> require session
/// 2. path under `/edit` -> require session
/// 3. path under `/products` with a non-read method -> require session
/// 4. otherwise -> allow
pub fn evaluate(path: &str, method: &Method, has_session: bool) -> Access {
    if requires_session(path, method) && !has_session {
        Access::Deny
    } else {
        Access::Allow
    }
}

/// Denied page routes redirect to sign-in; denied API routes get 401
pub fn is_page_path(path: &str) -> bool {
    under(path, "/create") || under(path, "/edit")
}

fn requires_session(path: &str, method: &Method) -> bool {
    if is_page_path(path) {
        return true;
    }
    under(path, "/products") && !is_read(method)
}

fn is_read(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}

fn under(path: &str, prefix: &str) -> bool {
    path == prefix || path.starts_with(&format!("{}/", prefix))
}
