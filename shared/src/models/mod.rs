use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::RestError;

/// Layout used for `dateCreated`, always rendered in UTC
pub const API_DATE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Serialize, Deserialize, FromRow, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct User {
    pub id: i64,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "dateCreated")]
    pub date_created: String,
    pub status: String,
}

impl User {
    /// A user carrying only its id, ready to be hydrated from the store
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

// Response DTOs for general use across services
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
    pub status: u16,
    pub error: String,
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        Self {
            message: err.message().to_string(),
            status: err.status_code(),
            error: err.kind().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct StatusResponse {
    pub status: String,
}

// Helper function to get current timestamp as string
pub fn now_str() -> String {
    Utc::now().format(API_DATE_LAYOUT).to_string()
}
