use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::PgStore;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Schedule {
    pub id: i64,
    pub day_of_week: String,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: Option<f64>,
    pub user_id: i64,
    pub deleted: bool,
}

/// Writable fields of a schedule; updates replace all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleInput {
    pub day_of_week: String,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: Option<f64>,
}

/// Workout schedules, always scoped to their owner.
#[async_trait]
pub trait ScheduleRepo: Send + Sync {
    async fn create(&self, owner: i64, input: ScheduleInput) -> anyhow::Result<Schedule>;
    async fn list(&self, owner: i64) -> anyhow::Result<Vec<Schedule>>;
    async fn get(&self, owner: i64, id: i64) -> anyhow::Result<Option<Schedule>>;
    async fn update(
        &self,
        owner: i64,
        id: i64,
        input: ScheduleInput,
    ) -> anyhow::Result<Option<Schedule>>;
    /// `false` if no schedule with this id belongs to `owner`.
    async fn soft_delete(&self, owner: i64, id: i64) -> anyhow::Result<bool>;
}

const SCHEDULE_COLUMNS: &str =
    "id, day_of_week, exercise_name, sets, reps, weight, user_id, deleted";

#[async_trait]
impl ScheduleRepo for PgStore {
    async fn create(&self, owner: i64, input: ScheduleInput) -> anyhow::Result<Schedule> {
        let row = sqlx::query_as::<_, Schedule>(&format!(
            r#"
            INSERT INTO schedules (day_of_week, exercise_name, sets, reps, weight, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SCHEDULE_COLUMNS}
            "#
        ))
        .bind(&input.day_of_week)
        .bind(&input.exercise_name)
        .bind(input.sets)
        .bind(input.reps)
        .bind(input.weight)
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .context("insert schedule")?;
        Ok(row)
    }

    async fn list(&self, owner: i64) -> anyhow::Result<Vec<Schedule>> {
        let rows = sqlx::query_as::<_, Schedule>(&format!(
            r#"
            SELECT {SCHEDULE_COLUMNS}
              FROM schedules
             WHERE user_id = $1 AND deleted = FALSE
             ORDER BY id
            "#
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .context("list schedules")?;
        Ok(rows)
    }

    async fn get(&self, owner: i64, id: i64) -> anyhow::Result<Option<Schedule>> {
        let row = sqlx::query_as::<_, Schedule>(&format!(
            r#"
            SELECT {SCHEDULE_COLUMNS}
              FROM schedules
             WHERE id = $1 AND user_id = $2 AND deleted = FALSE
            "#
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .context("get schedule")?;
        Ok(row)
    }

    async fn update(
        &self,
        owner: i64,
        id: i64,
        input: ScheduleInput,
    ) -> anyhow::Result<Option<Schedule>> {
        let row = sqlx::query_as::<_, Schedule>(&format!(
            r#"
            UPDATE schedules
               SET day_of_week = $3, exercise_name = $4, sets = $5, reps = $6, weight = $7
             WHERE id = $1 AND user_id = $2 AND deleted = FALSE
            RETURNING {SCHEDULE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner)
        .bind(&input.day_of_week)
        .bind(&input.exercise_name)
        .bind(input.sets)
        .bind(input.reps)
        .bind(input.weight)
        .fetch_optional(&self.pool)
        .await
        .context("update schedule")?;
        Ok(row)
    }

    async fn soft_delete(&self, owner: i64, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("UPDATE schedules SET deleted = TRUE WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .context("soft delete schedule")?;
        Ok(res.rows_affected() > 0)
    }
}
