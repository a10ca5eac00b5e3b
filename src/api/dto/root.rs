//! DTO for the root status endpoint.

use serde::Serialize;

/// Body of `GET /`.
#[derive(Debug, Serialize, PartialEq)]
pub struct RootResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl RootResponse {
    pub fn up() -> Self {
        Self {
            status: "OK",
            message: "BCR API is up and running!",
        }
    }
}
