use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{auth, products, upload};
use crate::middleware::{attach_session, enforce_guard};

/// Assemble the full application router.
///
/// The guard layer sits in front of every route; which paths actually
/// require a session is decided by the rule table in [`crate::guard`].
pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Product catalog (mutating verbs require a session)
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        // Image upload
        .route("/upload", post(upload::upload))
        // Accounts and sessions
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/session", get(auth::session))
        // Global middleware: session attachment runs first, then the guard
        .layer(from_fn(enforce_guard))
        .layer(from_fn(attach_session))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Clothier API",
        "version": version,
        "description": "Clothing store catalog API built with Rust (Axum)",
        "endpoints": {
            "home": "/ (public)",
            "products": "GET /products?search=&page=&limit= (public), POST /products (session)",
            "product": "GET /products/:id (public), PUT/DELETE /products/:id (session)",
            "upload": "POST /upload (multipart image)",
            "auth": "POST /auth/register, POST /auth/login, GET /auth/session",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
