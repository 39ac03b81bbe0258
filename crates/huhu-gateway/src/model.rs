use huhu_core::Joke;
use serde::{Deserialize, Serialize};

/// Body of the create and update endpoints.
#[derive(Debug, Deserialize)]
pub struct JokeRequest {
    #[serde(default)]
    pub text: String,
}

/// Raw list query. Values are parsed leniently by `Page::from_params`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JokeListResponse {
    pub jokes: Vec<Joke>,
    pub total: u64,
    pub limit: u32,
    pub offset: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
