use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest};

/// Public MyMemory endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Text MyMemory puts in `translatedText` when both sides of the pair are the same language
pub const DISTINCT_LANGUAGES_MARKER: &str = "PLEASE SELECT TWO DISTINCT LANGUAGES";

/// MyMemory client for the public translation memory API
#[derive(Debug, Clone)]
pub struct MyMemory {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL
    endpoint: String,
    /// Contact address sent as `de`, which raises the daily quota
    contact_email: Option<String>,
}

/// MyMemory `/get` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponse {
    /// The translation payload
    #[serde(default)]
    pub response_data: Option<MyMemoryResponseData>,

    /// Status, sent either as a number or as a numeric string
    #[serde(default)]
    pub response_status: Option<Value>,

    /// Free-form details, usually empty on success
    #[serde(default)]
    pub response_details: Option<Value>,

    /// Set when the daily quota is used up
    #[serde(default)]
    pub quota_finished: Option<bool>,
}

/// The `responseData` block
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponseData {
    /// Translated text
    #[serde(default)]
    pub translated_text: Option<String>,
}

impl MyMemoryResponse {
    /// Status code carried in the payload, 200 when absent
    pub fn status_code(&self) -> u16 {
        match &self.response_status {
            Some(Value::Number(n)) => n.as_u64().and_then(|n| u16::try_from(n).ok()).unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 200,
        }
    }

    fn details(&self) -> String {
        match &self.response_details {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Pull the translation out of the payload, or explain why there is none
    pub fn into_translation(self) -> Result<String, ProviderError> {
        let status_code = self.status_code();
        let details = self.details();
        let quota_finished = self.quota_finished.unwrap_or(false);
        let text = self
            .response_data
            .and_then(|data| data.translated_text)
            .filter(|text| !text.trim().is_empty());

        if let Some(text) = &text {
            if text.to_uppercase().contains(DISTINCT_LANGUAGES_MARKER) {
                return Err(ProviderError::SameLanguage(text.clone()));
            }
        }

        if quota_finished || status_code == 429 {
            return Err(ProviderError::RateLimitExceeded(if details.is_empty() {
                "MyMemory daily quota exhausted".to_string()
            } else {
                details
            }));
        }

        if !(200..300).contains(&status_code) {
            return Err(ProviderError::ApiError {
                status_code,
                message: if details.is_empty() {
                    text.unwrap_or_default()
                } else {
                    details
                },
            });
        }

        text.ok_or_else(|| ProviderError::ParseError("response has no translatedText".to_string()))
    }
}

impl MyMemory {
    /// Create a new MyMemory client
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: if endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                endpoint
            },
            contact_email: None,
        }
    }

    /// Send a contact address with every request
    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.contact_email = if email.trim().is_empty() { None } else { Some(email) };
        self
    }

    /// The endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the GET URL for a request
    pub fn build_url(&self, request: &TranslationRequest) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", self.endpoint, e))
        })?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("q", &request.text);
            query.append_pair(
                "langpair",
                &format!("{}|{}", request.source_language, request.target_language),
            );
            if let Some(email) = &self.contact_email {
                query.append_pair("de", email);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl Provider for MyMemory {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let url = self.build_url(request)?;
        debug!(
            "MyMemory request: {} chars, {}|{}",
            request.text.chars().count(),
            request.source_language,
            request.target_language
        );

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ProviderError::ConnectionError(e.to_string())
            } else {
                ProviderError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("MyMemory API error ({}): {}", status, error_text);
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimitExceeded(error_text));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        serde_json::from_str::<MyMemoryResponse>(&body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?
            .into_translation()
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = TranslationRequest::new("Hello", "en", "hi");
        self.translate(&request).await.map(|_| ())
    }

    fn name(&self) -> &str {
        "mymemory"
    }
}
