use serde::{Deserialize, Serialize};

use super::repo::{Schedule, ScheduleInput};
use crate::common::validate;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub day_of_week: String,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: i32,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl ScheduleRequest {
    pub fn validate(self) -> AppResult<ScheduleInput> {
        let day_of_week = self.day_of_week.trim().to_string();
        let exercise_name = self.exercise_name.trim().to_string();

        validate::required("day_of_week", &day_of_week)?;
        validate::max_len("day_of_week", &day_of_week, 10)?;
        validate::required("exercise_name", &exercise_name)?;
        validate::max_len("exercise_name", &exercise_name, 100)?;
        if self.sets < 0 || self.reps < 0 {
            return Err(AppError::BadRequest("sets and reps must not be negative".into()));
        }
        if let Some(w) = self.weight {
            if !w.is_finite() || w < 0.0 {
                return Err(AppError::BadRequest("weight must be a non-negative number".into()));
            }
        }

        Ok(ScheduleInput {
            day_of_week,
            exercise_name,
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub id: i64,
    pub day_of_week: String,
    pub exercise_name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: Option<f64>,
    pub user_id: i64,
}

impl From<Schedule> for ScheduleResponse {
    fn from(s: Schedule) -> Self {
        Self {
            id: s.id,
            day_of_week: s.day_of_week,
            exercise_name: s.exercise_name,
            sets: s.sets,
            reps: s.reps,
            weight: s.weight,
            user_id: s.user_id,
        }
    }
}
