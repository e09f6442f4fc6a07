use serde::{Deserialize, Serialize};

/// Body of `POST /shorten`.
///
/// A missing `url` field is treated like an empty one.
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
