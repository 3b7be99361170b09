use serde::{Deserialize, Serialize};

/// JWT payload of an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: String, // username
    #[serde(default)]
    pub iat: i64, // issued at (unix timestamp)
    pub exp: i64, // expires at (unix timestamp)
    #[serde(default)]
    pub jti: String, // random token id
}
