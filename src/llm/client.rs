use std::future::Future;

use reqwest::Client;

use super::prompt::{REQUESTED_CARDS, flashcard_prompt};
use super::provider::Provider;
use super::response::{
    ErrorResponse, GenerateContentRequest, GenerateContentResponse, parse_flashcards,
};
use crate::card::Flashcard;
use crate::error::GenerationError;

/// Turns a topic into cards. Implementors issue at most one request per call.
pub trait CardGenerator {
    fn generate(
        &self,
        topic: &str,
        api_key: &str,
    ) -> impl Future<Output = Result<Vec<Flashcard>, GenerationError>> + Send;
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    provider: Provider,
}

impl GeminiClient {
    pub fn new(provider: Provider) -> Self {
        Self {
            client: Client::new(),
            provider,
        }
    }

    async fn request_text(&self, prompt: &str, api_key: &str) -> Result<String, GenerationError> {
        let url = self.provider.generate_url();
        tracing::debug!(model = %self.provider.model, "requesting flashcards");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(GenerationError::network)?;

        let status = response.status();
        tracing::debug!(%status, "provider responded");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|error| error.message().to_string())
                .unwrap_or_else(|_| status.to_string());
            return Err(GenerationError::Api(message));
        }

        let body = response.text().await.map_err(GenerationError::network)?;
        let body: GenerateContentResponse = serde_json::from_str(&body)?;
        body.first_text()
            .map(str::to_string)
            .ok_or(GenerationError::MissingContent)
    }
}

impl CardGenerator for GeminiClient {
    async fn generate(&self, topic: &str, api_key: &str) -> Result<Vec<Flashcard>, GenerationError> {
        let prompt = flashcard_prompt(topic);
        let text = self.request_text(&prompt, api_key).await?;
        let cards = parse_flashcards(&text)?;

        if cards.len() != REQUESTED_CARDS {
            tracing::warn!(
                requested = REQUESTED_CARDS,
                received = cards.len(),
                "model returned an unexpected number of cards"
            );
        }
        tracing::info!(count = cards.len(), topic, "generated flashcards");
        Ok(cards)
    }
}
