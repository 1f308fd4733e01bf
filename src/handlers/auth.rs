// Account and session handlers: register, login, current-session lookup.
//
// Registration keeps its historical response shape ({"message": ...})
// rather than the {"error": ...} body the product API uses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, password, Claims};
use crate::config;
use crate::database::{DatabaseManager, UserRepository};
use crate::error::ApiError;
use crate::middleware::Session;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /auth/register - create a new account
pub async fn register(Json(body): Json<RegisterRequest>) -> Response {
    if body.name.trim().is_empty() || body.email.trim().is_empty() || body.password.is_empty() {
        return message(StatusCode::BAD_REQUEST, "Missing required fields");
    }

    let min_length = config::config().security.min_password_length;
    if body.password.len() < min_length {
        return message(
            StatusCode::BAD_REQUEST,
            &format!("Password must be at least {} characters", min_length),
        );
    }

    let email = body.email.trim().to_lowercase();

    match create_account(&body.name, &email, &body.password).await {
        Ok(Some(user_id)) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "User created successfully",
                "userId": user_id,
            })),
        )
            .into_response(),
        Ok(None) => message(StatusCode::BAD_REQUEST, "User already exists"),
        Err(e) => {
            tracing::error!("Registration error: {}", e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

// None means the email is already taken
async fn create_account(
    name: &str,
    email: &str,
    plaintext: &str,
) -> anyhow::Result<Option<uuid::Uuid>> {
    let pool = DatabaseManager::pool().await?;
    let users = UserRepository::new(pool);

    if users.find_by_email(email).await?.is_some() {
        return Ok(None);
    }

    let password_hash =
        password::hash_password(plaintext).map_err(|e| anyhow::anyhow!("hash failed: {}", e))?;
    let user = users.create(name, email, &password_hash).await?;
    Ok(Some(user.id))
}

/// POST /auth/login - exchange credentials for a session token
pub async fn login(Json(body): Json<LoginRequest>) -> Result<Json<Value>, ApiError> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let pool = DatabaseManager::pool().await?;
    let users = UserRepository::new(pool);

    let user = users
        .find_by_email(&body.email.trim().to_lowercase())
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !password::verify_password(&body.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = auth::issue_token(&Claims::for_user(&user))?;

    Ok(Json(json!({
        "token": token,
        "user": {
            "id": user.id,
            "name": user.name,
            "email": user.email,
        }
    })))
}

/// GET /auth/session - current-session lookup
pub async fn session(session: Option<Extension<Session>>) -> Result<Json<Value>, ApiError> {
    let Some(Extension(session)) = session else {
        return Err(ApiError::unauthorized("No active session"));
    };

    Ok(Json(json!({
        "user": {
            "id": session.user_id,
            "name": session.name,
            "email": session.email,
        }
    })))
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}
