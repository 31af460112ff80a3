use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationRequest, TextGenerator};
use crate::error::{CalendarError, CalendarResult};
use crate::models::settings::GenerationSettings;

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Text generation over a `generateContent` HTTP endpoint.
pub struct HttpTextGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpTextGenerator {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build text generation HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Build from settings, reading the API key from the configured
    /// environment variable.
    pub fn from_settings(settings: &GenerationSettings) -> CalendarResult<Self> {
        let api_key = std::env::var(&settings.api_key_env).map_err(|_| {
            CalendarError::Config(format!(
                "Environment variable {} is not set",
                settings.api_key_env
            ))
        })?;

        Self::new(
            settings.endpoint.clone(),
            api_key,
            Duration::from_secs(settings.timeout_secs.max(1)),
        )
        .map_err(|err| CalendarError::Config(format!("{:#}", err)))
    }

    fn request_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(model)
        )
    }

    fn generate_once(&self, request: &GenerationRequest) -> Result<String> {
        let response = self
            .client
            .post(self.request_url(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(&request.prompt))
            .send()
            .context("Network error during text generation")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Text generation failed with HTTP status {}", status));
        }

        let body: GenerateContentResponse = response
            .json()
            .context("Failed to decode text generation response")?;

        extract_text(body).ok_or_else(|| anyhow!("Text generation returned no text"))
    }
}

impl TextGenerator for HttpTextGenerator {
    fn generate(&self, request: &GenerationRequest) -> CalendarResult<String> {
        self.generate_once(request)
            .map_err(|err| CalendarError::Generation(format!("{:#}", err)))
    }
}

fn request_body(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
    }
}

/// Text of the first candidate, parts concatenated. `None` when empty.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().map(|part| part.text).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
