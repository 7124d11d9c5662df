//! AI recipe generation client
//!
//! POSTs `{"prompt": ...}` to a configured endpoint and decodes a recipe
//! with free-text ingredient amounts.

use serde::{Deserialize, Serialize};

use super::{http_client, read_body, ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedIngredient {
    pub name: String,
    /// Measure text, e.g. "1/2 cup"
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<GeneratedIngredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

/// Endpoints answer either with the recipe itself or wrapped in `{"recipe": ...}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Wrapped { recipe: GeneratedRecipe },
    Bare(GeneratedRecipe),
}

pub fn decode_generated_recipe(body: &str) -> ClientResult<GeneratedRecipe> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    Ok(match response {
        GenerateResponse::Wrapped { recipe } => recipe,
        GenerateResponse::Bare(recipe) => recipe,
    })
}

pub struct AiRecipeClient {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl AiRecipeClient {
    pub fn new(endpoint: Option<String>) -> ClientResult<Self> {
        Ok(Self {
            http: http_client()?,
            endpoint,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    pub async fn generate(&self, prompt: &str) -> ClientResult<GeneratedRecipe> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(ClientError::NotConfigured(crate::config::AI_ENDPOINT_VAR))?;

        let response = self
            .http
            .post(endpoint)
            .json(&GenerateRequest { prompt })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Recipe generation request failed: {}", e);
                ClientError::from(e)
            })?;
        let body = read_body(response).await?;
        decode_generated_recipe(&body).map_err(|e| {
            tracing::error!("Recipe generation returned an unreadable body: {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_recipe() {
        let body = r#"{
            "name": "Overnight Oats with Berries",
            "ingredients": [
                {"name": "Rolled oats", "amount": "1/2 cup"},
                {"name": "Honey", "amount": "1 tsp"}
            ],
            "instructions": ["Mix oats", "Refrigerate overnight"]
        }"#;
        let recipe = decode_generated_recipe(body).unwrap();
        assert_eq!(recipe.name, "Overnight Oats with Berries");
        assert_eq!(recipe.ingredients[0].amount, "1/2 cup");
        assert_eq!(recipe.instructions.len(), 2);
    }

    #[test]
    fn test_decode_wrapped_recipe() {
        let body = r#"{"recipe": {"name": "Toast", "ingredients": [{"name": "Bread"}]}}"#;
        let recipe = decode_generated_recipe(body).unwrap();
        assert_eq!(recipe.name, "Toast");
        assert_eq!(recipe.ingredients[0].amount, "");
        assert!(recipe.instructions.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_endpoint() {
        let client = AiRecipeClient::new(None).unwrap();
        assert!(!client.is_configured());
        let result = client.generate("pasta").await;
        assert!(matches!(result, Err(ClientError::NotConfigured(_))));
    }
}
