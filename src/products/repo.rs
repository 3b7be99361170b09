use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::PgStore;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    pub product_desc: Option<String>,
    pub product_type: Option<String>,
    pub product_price: f64,
    pub product_image: Option<Vec<u8>>,
    pub deleted: bool,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_name: String,
    pub product_desc: Option<String>,
    pub product_type: Option<String>,
    pub product_price: f64,
    pub product_image: Option<Vec<u8>>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub product_name: Option<String>,
    pub product_desc: Option<String>,
    pub product_type: Option<String>,
    pub product_price: Option<f64>,
    pub product_image: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub product_type: Option<String>,
}

/// Catalog of products. Reads never return soft-deleted rows.
#[async_trait]
pub trait ProductRepo: Send + Sync {
    async fn create(&self, new: NewProduct) -> anyhow::Result<Product>;
    async fn list(&self, filter: &ProductFilter) -> anyhow::Result<Vec<Product>>;
    async fn get(&self, id: i64) -> anyhow::Result<Option<Product>>;
    /// `None` if the product is absent or soft-deleted.
    async fn update(&self, id: i64, patch: ProductPatch) -> anyhow::Result<Option<Product>>;
    /// Flags the row; `false` only if it never existed.
    async fn soft_delete(&self, id: i64) -> anyhow::Result<bool>;
}

const PRODUCT_COLUMNS: &str =
    "id, product_name, product_desc, product_type, product_price, product_image, deleted";

#[async_trait]
impl ProductRepo for PgStore {
    async fn create(&self, new: NewProduct) -> anyhow::Result<Product> {
        let row = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (product_name, product_desc, product_type, product_price, product_image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&new.product_name)
        .bind(&new.product_desc)
        .bind(&new.product_type)
        .bind(new.product_price)
        .bind(&new.product_image)
        .fetch_one(&self.pool)
        .await
        .context("insert product")?;
        Ok(row)
    }

    async fn list(&self, filter: &ProductFilter) -> anyhow::Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
              FROM products
             WHERE deleted = FALSE
               AND ($1::float8 IS NULL OR product_price >= $1)
               AND ($2::float8 IS NULL OR product_price <= $2)
               AND ($3::text IS NULL OR product_type = $3)
             ORDER BY id
            "#
        ))
        .bind(filter.min_price)
        .bind(filter.max_price)
        .bind(&filter.product_type)
        .fetch_all(&self.pool)
        .await
        .context("list products")?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Product>> {
        let row = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND deleted = FALSE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("get product")?;
        Ok(row)
    }

    async fn update(&self, id: i64, patch: ProductPatch) -> anyhow::Result<Option<Product>> {
        let row = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
               SET product_name  = COALESCE($2, product_name),
                   product_desc  = COALESCE($3, product_desc),
                   product_type  = COALESCE($4, product_type),
                   product_price = COALESCE($5, product_price),
                   product_image = COALESCE($6, product_image)
             WHERE id = $1 AND deleted = FALSE
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&patch.product_name)
        .bind(&patch.product_desc)
        .bind(&patch.product_type)
        .bind(patch.product_price)
        .bind(&patch.product_image)
        .fetch_optional(&self.pool)
        .await
        .context("update product")?;
        Ok(row)
    }

    async fn soft_delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE products SET deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("soft delete product")?;
        Ok(res.rows_affected() > 0)
    }
}
