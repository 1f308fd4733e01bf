// Product catalog handlers: list/get/create/update/delete.
// Input validation lives here, in front of the store.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::config;
use crate::database::models::Product;
use crate::database::products::{NewProduct, ProductChanges};
use crate::database::{DatabaseError, DatabaseManager, ProductRepository};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// Fields are defaulted so an absent field reports as a validation
// failure instead of a body-deserialization rejection
#[derive(Debug, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Option<f64>,
    #[serde(default)]
    pub image: String,
}

impl ProductInput {
    fn validate(self) -> Result<NewProduct, ApiError> {
        let missing = || {
            ApiError::validation_error(
                "Invalid input: name, description, and price are required, \
                 and price must be a non-negative number",
            )
        };

        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err(missing());
        }
        let price = self.price.ok_or_else(missing)?;
        validate_price(price)?;

        Ok(NewProduct {
            name: self.name,
            description: self.description,
            price,
            image: self.image,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

impl ProductPatch {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ApiError::validation_error("Name cannot be empty"));
            }
        }
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                return Err(ApiError::validation_error("Description cannot be empty"));
            }
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

// Price policy: any finite number >= 0 is valid, zero included
fn validate_price(price: f64) -> Result<(), ApiError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::validation_error(
            "Price must be a non-negative number",
        ));
    }
    Ok(())
}

/// GET /products - one page of the catalog with total match count.
///
/// A store failure never yields a partial result: the body is an
/// explicitly empty page with an error indicator.
pub async fn list(Query(query): Query<ListQuery>) -> Response {
    let api_config = &config::config().api;
    let search = query.search.unwrap_or_default();
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(api_config.default_page_size)
        .clamp(1, api_config.max_page_size);

    match list_page(&search, page, limit).await {
        Ok((products, total)) => {
            Json(json!({ "products": products, "total": total })).into_response()
        }
        Err(e) => {
            tracing::error!("Error listing products: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "products": [],
                    "total": 0,
                    "error": "Error fetching products"
                })),
            )
                .into_response()
        }
    }
}

async fn list_page(search: &str, page: i64, limit: i64) -> Result<(Vec<Product>, i64), DatabaseError> {
    let pool = DatabaseManager::pool().await?;
    ProductRepository::new(pool).list(search, page, limit).await
}

/// GET /products/:id
pub async fn show(Path(id): Path<String>) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let pool = DatabaseManager::pool().await?;

    match ProductRepository::new(pool).get(id).await? {
        Some(product) => Ok(Json(product)),
        None => Err(ApiError::not_found("Product not found")),
    }
}

/// POST /products
pub async fn create(
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let new = input.validate()?;

    let pool = DatabaseManager::pool().await?;
    let product = ProductRepository::new(pool).create(new).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/:id - partial or full field replacement
pub async fn update(
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    patch.validate()?;

    let pool = DatabaseManager::pool().await?;
    let changes = ProductChanges {
        name: patch.name,
        description: patch.description,
        price: patch.price,
        image: patch.image,
    };

    match ProductRepository::new(pool).update(id, changes).await? {
        Some(product) => Ok(Json(product)),
        None => Err(ApiError::not_found("Product not found")),
    }
}

/// DELETE /products/:id
pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    let pool = DatabaseManager::pool().await?;

    if ProductRepository::new(pool).delete(id).await? {
        Ok(Json(json!({ "message": "Product deleted" })))
    } else {
        Err(ApiError::not_found("Product not found"))
    }
}

// A malformed id cannot name a record, so it reads as not-found rather
// than leaking a parse error to the client
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Product not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, description: &str, price: Option<f64>) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: description.to_string(),
            price,
            image: String::new(),
        }
    }

    #[test]
    fn create_input_accepts_zero_price() {
        let new = input("Red Shirt", "Cotton tee", Some(0.0)).validate().unwrap();
        assert_eq!(new.price, 0.0);
        assert_eq!(new.name, "Red Shirt");
    }

    #[test]
    fn create_input_rejects_blank_or_missing_fields() {
        assert!(input("", "Cotton tee", Some(19.99)).validate().is_err());
        assert!(input("Red Shirt", "   ", Some(19.99)).validate().is_err());
        assert!(input("Red Shirt", "Cotton tee", None).validate().is_err());
    }

    #[test]
    fn create_input_rejects_bad_prices() {
        assert!(input("Red Shirt", "Cotton tee", Some(-1.0)).validate().is_err());
        assert!(input("Red Shirt", "Cotton tee", Some(f64::NAN)).validate().is_err());
        assert!(input("Red Shirt", "Cotton tee", Some(f64::INFINITY)).validate().is_err());
    }

    #[test]
    fn patch_validates_only_provided_fields() {
        assert!(ProductPatch::default().validate().is_ok());
        assert!(ProductPatch {
            price: Some(9.99),
            ..Default::default()
        }
        .validate()
        .is_ok());
        assert!(ProductPatch {
            name: Some(String::new()),
            ..Default::default()
        }
        .validate()
        .is_err());
        assert!(ProductPatch {
            price: Some(-0.01),
            ..Default::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn malformed_ids_read_as_not_found() {
        let err = parse_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
