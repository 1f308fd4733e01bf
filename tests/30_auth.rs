mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_validates_input() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Missing fields
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "name": "", "email": "a@example.com", "password": "longenough" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Missing required fields");

    // Short password
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "name": "A", "email": "a@example.com", "password": "short" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Password must be at least 6 characters");

    Ok(())
}

#[tokio::test]
async fn register_login_session_flow() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = format!("flow-{}@Example.COM", uuid::Uuid::new_v4());

    // Register
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "name": "Flow User", "email": email, "password": "secret-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "User created successfully");
    assert!(body.get("userId").is_some(), "missing userId: {}", body);

    // Duplicate registration is rejected; emails compare lower-cased
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({
            "name": "Flow User",
            "email": email.to_lowercase(),
            "password": "secret-password",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "User already exists");

    // Wrong password
    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": email, "password": "wrong-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Login
    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": email, "password": "secret-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let token = body["token"].as_str().expect("token").to_string();
    assert_eq!(body["user"]["name"], "Flow User");

    // Session lookup with the token
    let res = client
        .get(format!("{}/auth/session", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["user"]["email"], email.to_lowercase());

    // And without
    let res = client
        .get(format!("{}/auth/session", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
