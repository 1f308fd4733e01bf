use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Product;

/// New-record fields, already validated by the API layer
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
}

/// Partial update; None leaves the stored field untouched
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One page of the catalog plus the total match count.
    ///
    /// The search term is a case-insensitive substring match on name; an
    /// empty term matches everything. The count runs over the same filter,
    /// independent of pagination, so page arithmetic stays consistent with
    /// later pages. Both queries run concurrently; no transaction spans
    /// them, so totals are best-effort under concurrent writes.
    pub async fn list(
        &self,
        search: &str,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Product>, i64), DatabaseError> {
        let page = page.max(1);
        let limit = limit.max(1);
        let offset = (page - 1) * limit;
        let pattern = format!("%{}%", escape_like(search));

        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, image, created_at, updated_at
             FROM products
             WHERE name ILIKE $1
             ORDER BY created_at, id
             OFFSET $2 LIMIT $3",
        )
        .bind(&pattern)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool);

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE name ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool);

        let (rows, total) = tokio::try_join!(rows, total)?;
        Ok((rows, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Product>, DatabaseError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, image, created_at, updated_at
             FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn create(&self, new: NewProduct) -> Result<Product, DatabaseError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, description, price, image)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, description, price, image, created_at, updated_at",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(&new.image)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    /// Apply a partial or full field replacement; returns None when no
    /// record matches the id. Last write wins under concurrent updates.
    pub async fn update(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> Result<Option<Product>, DatabaseError> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                image = COALESCE($5, image),
                updated_at = now()
             WHERE id = $1
             RETURNING id, name, description, price, image, created_at, updated_at",
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.price)
        .bind(changes.image)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    /// Remove the record; Ok(false) when nothing matched
    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Escape ILIKE metacharacters so the search term matches literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
