//! Outbound HTTP clients
//!
//! MealDB for recipe data and an optional AI endpoint for generated
//! recipes, plus the initialize-once loader used to cache shared lookups.

pub mod ai;
pub mod loader;
pub mod mealdb;

use thiserror::Error;

pub use ai::{AiRecipeClient, GeneratedIngredient, GeneratedRecipe};
pub use loader::SharedLoader;
pub use mealdb::MealDbClient;

/// Client error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Shared reqwest client with the crate's user agent and timeout
pub(crate) fn http_client() -> ClientResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(20))
        .user_agent(format!("{}/{}", crate::build_info::NAME, crate::build_info::VERSION))
        .build()?)
}

/// Turn a non-success response into `ClientError::Status`
pub(crate) async fn read_body(response: reqwest::Response) -> ClientResult<String> {
    let status = response.status();
    let url = response.url().to_string();
    if !status.is_success() {
        tracing::error!("Request to {} failed with status {}", url, status);
        return Err(ClientError::Status {
            status: status.as_u16(),
            url,
        });
    }
    Ok(response.text().await?)
}
