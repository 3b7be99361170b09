use serde::{Deserialize, Serialize};

use crate::auth::repo_types::User;
use crate::common::validate;
use crate::error::AppResult;

pub const DEFAULT_ROLE: &str = "user";
pub const DEFAULT_AVATAR: &str = "avatar";

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A registration that passed validation, with defaults filled in.
#[derive(Debug)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
}

impl RegisterRequest {
    pub fn validate(self) -> AppResult<Registration> {
        let username = self.username.trim().to_string();
        let email = self.email.trim().to_lowercase();
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();
        let role = non_blank(self.role).unwrap_or_else(|| DEFAULT_ROLE.to_string());
        let avatar = non_blank(self.avatar).unwrap_or_else(|| DEFAULT_AVATAR.to_string());

        validate::required("username", &username)?;
        validate::max_len("username", &username, 50)?;
        validate::required("password", &self.password)?;
        validate::email("email", &email)?;
        validate::max_len("first_name", &first_name, 50)?;
        validate::max_len("last_name", &last_name, 50)?;
        validate::max_len("role", &role, 20)?;
        validate::max_len("avatar", &avatar, 255)?;

        Ok(Registration {
            first_name,
            last_name,
            username,
            password: self.password,
            email,
            role,
            avatar,
        })
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            username: u.username,
            email: u.email,
            role: u.role,
            avatar: u.avatar,
        }
    }
}
