//! MealDB API client
//!
//! Read-only JSON endpoints. List endpoints return `{"meals": null}` when
//! nothing matches, which decodes to an empty list.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::models::{order_categories, Category, Meal, MealSummary};

use super::{http_client, read_body, ClientError, ClientResult, SharedLoader};

#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    categories: Option<Vec<Category>>,
}

#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

/// Decode a `categories.php` body, priority categories first
pub fn decode_categories(body: &str) -> ClientResult<Vec<Category>> {
    let envelope: CategoriesEnvelope = serde_json::from_str(body)?;
    Ok(order_categories(envelope.categories.unwrap_or_default()))
}

/// Decode any `{"meals": [...]}` body
pub fn decode_meals<T: DeserializeOwned>(body: &str) -> ClientResult<Vec<T>> {
    let envelope: MealsEnvelope<T> = serde_json::from_str(body)?;
    Ok(envelope.meals.unwrap_or_default())
}

pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
    categories: SharedLoader<Vec<Category>>,
}

impl MealDbClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Ok(Self {
            http: http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            categories: SharedLoader::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, endpoint: &str, query: &[(&str, &str)]) -> ClientResult<String> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self.http.get(&url).query(query).send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", url, e);
            ClientError::from(e)
        })?;
        read_body(response).await
    }

    /// All categories; fetched once, then served from memory
    pub async fn categories(&self) -> ClientResult<&[Category]> {
        let categories = self
            .categories
            .ensure_loaded(|| async {
                let body = self.fetch("categories.php", &[]).await?;
                decode_categories(&body)
            })
            .await?;
        Ok(categories.as_slice())
    }

    pub async fn filter_by_category(&self, category: &str) -> ClientResult<Vec<MealSummary>> {
        let body = self.fetch("filter.php", &[("c", category)]).await?;
        decode_meals(&body)
    }

    pub async fn search(&self, query: &str) -> ClientResult<Vec<Meal>> {
        let body = self.fetch("search.php", &[("s", query)]).await?;
        decode_meals(&body)
    }

    pub async fn lookup(&self, id: &str) -> ClientResult<Option<Meal>> {
        let body = self.fetch("lookup.php", &[("i", id)]).await?;
        Ok(decode_meals(&body)?.into_iter().next())
    }

    pub async fn random(&self) -> ClientResult<Option<Meal>> {
        let body = self.fetch("random.php", &[]).await?;
        Ok(decode_meals(&body)?.into_iter().next())
    }
}
