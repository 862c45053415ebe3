// Re-export shared models for direct use in handlers
pub use bookstore_shared::models::{StatusResponse, User};

// Request DTOs
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub status: String,
}

// Only the first `status` value counts; a missing one searches for the empty status
impl From<Vec<(String, String)>> for SearchParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let status = pairs
            .into_iter()
            .find(|(key, _)| key == "status")
            .map(|(_, value)| value)
            .unwrap_or_default();

        Self { status }
    }
}
