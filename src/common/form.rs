use std::{collections::HashMap, str::FromStr};

use axum::extract::Multipart;
use bytes::Bytes;

use crate::error::{AppError, AppResult};

/// A fully buffered multipart form: text fields plus uploaded files.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, Bytes>,
}

impl FormData {
    pub async fn read(mut mp: Multipart) -> AppResult<Self> {
        let mut form = FormData::default();
        while let Some(field) = mp
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if field.file_name().is_some() {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read {}: {}", name, e)))?;
                // browsers send an empty part for an untouched file input
                if !data.is_empty() {
                    form.files.insert(name, data);
                }
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read {}: {}", name, e)))?;
                form.fields.insert(name, text);
            }
        }
        Ok(form)
    }

    /// Trimmed text value; blank counts as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn required_text(&self, name: &str) -> AppResult<String> {
        self.text(name)
            .ok_or_else(|| AppError::BadRequest(format!("{} is required", name)))
    }

    pub fn parsed<T: FromStr>(&self, name: &str) -> AppResult<Option<T>> {
        match self.text(name) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|_| AppError::BadRequest(format!("{} has an invalid value", name))),
        }
    }

    pub fn take_file(&mut self, name: &str) -> Option<Bytes> {
        self.files.remove(name)
    }

    #[cfg(test)]
    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    #[cfg(test)]
    pub fn with_file(mut self, name: &str, data: &'static [u8]) -> Self {
        self.files.insert(name.to_string(), Bytes::from_static(data));
        self
    }
}
