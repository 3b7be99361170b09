pub mod extract;
pub mod form;
pub mod validate;

use serde::Serialize;

/// Plain acknowledgement body, e.g. for soft deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}
