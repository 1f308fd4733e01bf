// POST /upload - accept a multipart image and forward it to the image host

use axum::{
    extract::Multipart,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::services::images::ImageService;

pub async fn upload(mut multipart: Multipart) -> Response {
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("image") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => return no_image(),
            Err(e) => {
                tracing::error!("Error reading upload form: {}", e);
                return upload_failed();
            }
        }
    };

    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Error reading upload body: {}", e);
            return upload_failed();
        }
    };

    if bytes.is_empty() {
        return no_image();
    }

    match ImageService::from_config()
        .upload(&file_name, &content_type, bytes.to_vec())
        .await
    {
        Ok(url) => Json(json!({ "url": url })).into_response(),
        Err(e) => {
            tracing::error!("Error uploading image: {}", e);
            upload_failed()
        }
    }
}

fn no_image() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "No image uploaded" })),
    )
        .into_response()
}

fn upload_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Upload failed" })),
    )
        .into_response()
}
