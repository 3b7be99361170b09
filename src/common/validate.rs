use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{AppError, AppResult};

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Rejects values longer than the backing column allows.
pub fn max_len(field: &str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

pub fn required(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

pub fn email(field: &str, value: &str) -> AppResult<()> {
    max_len(field, value, 120)?;
    if !is_valid_email(value) {
        return Err(AppError::BadRequest(format!("{} is not a valid email", field)));
    }
    Ok(())
}
