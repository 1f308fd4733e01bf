use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::form::{FormError, ImageRef, ProductForm};
use crate::catalog::state::CatalogState;
use crate::database::models::Product;

/// One fetched page of the catalog
#[derive(Debug, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Form(#[from] FormError),

    #[error("could not read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },
}

/// Whether a submit creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Edit(Uuid),
}

/// HTTP client for the catalog flow. Mutating calls carry the session
/// token when one has been attached.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Re-issue the list call for the state's current (search, page,
    /// page size) and replace the displayed set; a failure surfaces the
    /// error and clears it instead of keeping stale data.
    pub async fn refresh(&self, state: &mut CatalogState) {
        match self
            .list(&state.search, state.page, state.page_size)
            .await
        {
            Ok(page) => state.apply(page.products, page.total),
            Err(e) => state.fail(e.to_string()),
        }
    }

    pub async fn list(&self, search: &str, page: u32, limit: u32) -> Result<ProductPage, ClientError> {
        let response = self
            .http
            .get(format!("{}/products", self.base_url))
            .query(&[
                ("search", search.to_string()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Product, ClientError> {
        let response = self
            .http
            .get(format!("{}/products/{}", self.base_url, id))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Two-phase create/edit submit. Strictly sequential: a newly chosen
    /// image is uploaded first, and an upload failure aborts before any
    /// product mutation. After a successful upload the form keeps the
    /// hosted URL, so a retry after a failed persist does not re-upload
    /// unless a new file is chosen. A successful create resets the form;
    /// a failed persist leaves the entered values for retry.
    pub async fn submit(
        &self,
        form: &mut ProductForm,
        target: SubmitTarget,
    ) -> Result<Product, ClientError> {
        let fields = form.validate()?;

        if let ImageRef::Pending(path) = form.image.clone() {
            let url = self.upload(&path).await?;
            form.image = ImageRef::Existing(url);
        }

        let image = match &form.image {
            ImageRef::Existing(url) => url.clone(),
            _ => String::new(),
        };

        let body = json!({
            "name": fields.name,
            "description": fields.description,
            "price": fields.price,
            "image": image,
        });

        let request = match target {
            SubmitTarget::Create => self
                .http
                .post(format!("{}/products", self.base_url))
                .json(&body),
            SubmitTarget::Edit(id) => self
                .http
                .put(format!("{}/products/{}", self.base_url, id))
                .json(&body),
        };

        let product: Product = Self::parse(self.authorized(request).send().await?).await?;

        if target == SubmitTarget::Create {
            form.reset();
        }
        Ok(product)
    }

    /// Push a local file to the upload endpoint, returning the hosted URL
    pub async fn upload(&self, path: &Path) -> Result<String, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;
        let body: Value = Self::parse(response).await?;

        body.get("url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ClientError::Api {
                status: 500,
                message: "Upload response did not contain a url".to_string(),
            })
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let request = self
            .http
            .delete(format!("{}/products/{}", self.base_url, id));
        let _: Value = Self::parse(self.authorized(request).send().await?).await?;
        Ok(())
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(format!("{}/auth/register", self.base_url))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;
        let body: Value = Self::parse(response).await?;
        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("User created successfully")
            .to_string())
    }

    /// Exchange credentials for a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body: Value = Self::parse(response).await?;
        body.get("token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ClientError::Api {
                status: 500,
                message: "Login response did not contain a token".to_string(),
            })
    }

    pub async fn session(&self) -> Result<Value, ClientError> {
        let request = self.http.get(format!("{}/auth/session", self.base_url));
        Self::parse(self.authorized(request).send().await?).await
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Error bodies carry either {"error": ...} or {"message": ...}
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("error")
                    .or_else(|| body.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("request failed with status {}", status));

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
