//! Client for the external image host. The service accepts a binary blob
//! and answers with a durable public URL; everything else about it is
//! opaque to this application.

use once_cell::sync::Lazy;
use serde_json::Value;
use thiserror::Error;

use crate::config;

static HTTP: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image host is not configured")]
    NotConfigured,

    #[error("image host request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("image host returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("image host response did not contain a url")]
    MalformedResponse,
}

pub struct ImageService {
    endpoint: String,
    api_key: Option<String>,
}

impl ImageService {
    pub fn from_config() -> Self {
        let upload = &config::config().upload;
        Self {
            endpoint: upload.endpoint.clone(),
            api_key: upload.api_key.clone(),
        }
    }

    /// Send one image to the host and return its public URL
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        if self.endpoint.is_empty() {
            return Err(UploadError::NotConfigured);
        }

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let mut request = HTTP.post(&self.endpoint).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(UploadError::Status(response.status()));
        }

        let body: Value = response.json().await?;
        // Cloudinary-style hosts answer secure_url; simpler ones just url
        body.get("secure_url")
            .or_else(|| body.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(UploadError::MalformedResponse)
    }
}
