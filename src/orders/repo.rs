use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::PgStore;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub user_id: i64,
    pub deleted: bool,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// Orders, always scoped to the user who placed them.
#[async_trait]
pub trait OrderRepo: Send + Sync {
    async fn create(&self, owner: i64, new: NewOrder) -> anyhow::Result<Order>;
    async fn list(&self, owner: i64) -> anyhow::Result<Vec<Order>>;
    async fn get(&self, owner: i64, id: i64) -> anyhow::Result<Option<Order>>;
    async fn update(&self, owner: i64, id: i64, patch: OrderPatch) -> anyhow::Result<Option<Order>>;
    /// `false` if no order with this id belongs to `owner`.
    async fn soft_delete(&self, owner: i64, id: i64) -> anyhow::Result<bool>;
}

const ORDER_COLUMNS: &str = "id, name, address, phone_number, email, user_id, deleted";

#[async_trait]
impl OrderRepo for PgStore {
    async fn create(&self, owner: i64, new: NewOrder) -> anyhow::Result<Order> {
        let row = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (name, address, phone_number, email, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&new.name)
        .bind(&new.address)
        .bind(&new.phone_number)
        .bind(&new.email)
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .context("insert order")?;
        Ok(row)
    }

    async fn list(&self, owner: i64) -> anyhow::Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
              FROM orders
             WHERE user_id = $1 AND deleted = FALSE
             ORDER BY id
            "#
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .context("list orders")?;
        Ok(rows)
    }

    async fn get(&self, owner: i64, id: i64) -> anyhow::Result<Option<Order>> {
        let row = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
              FROM orders
             WHERE id = $1 AND user_id = $2 AND deleted = FALSE
            "#
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .context("get order")?;
        Ok(row)
    }

    async fn update(&self, owner: i64, id: i64, patch: OrderPatch) -> anyhow::Result<Option<Order>> {
        let row = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
               SET name         = COALESCE($3, name),
                   address      = COALESCE($4, address),
                   phone_number = COALESCE($5, phone_number),
                   email        = COALESCE($6, email)
             WHERE id = $1 AND user_id = $2 AND deleted = FALSE
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner)
        .bind(&patch.name)
        .bind(&patch.address)
        .bind(&patch.phone_number)
        .bind(&patch.email)
        .fetch_optional(&self.pool)
        .await
        .context("update order")?;
        Ok(row)
    }

    async fn soft_delete(&self, owner: i64, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE orders SET deleted = TRUE WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .context("soft delete order")?;
        Ok(res.rows_affected() > 0)
    }
}
