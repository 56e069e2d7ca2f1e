use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::models::{Question, QuizConfig};

use super::{QuestionProvider, RawQuestion};

pub const DEFAULT_ENDPOINT: &str = "https://opentdb.com/api.php";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ApiResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<RawQuestion>,
}

fn response_code_reason(code: u8) -> &'static str {
    match code {
        1 => "not enough questions for this query",
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token exhausted",
        5 => "rate limited",
        _ => "unknown response code",
    }
}

/// Parse an Open Trivia DB response body into decoded questions.
pub fn parse_response(body: &str) -> Result<Vec<Question>, ProviderError> {
    let response: ApiResponse = serde_json::from_str(body)?;
    if response.response_code != 0 {
        return Err(ProviderError::ResponseCode {
            code: response.response_code,
            reason: response_code_reason(response.response_code),
        });
    }

    response
        .results
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.decode_entities().into_question(index))
        .collect()
}

/// Multiple-choice questions from the Open Trivia DB HTTP API.
#[derive(Debug, Clone)]
pub struct OpenTdbProvider {
    client: Client,
    endpoint: String,
}

impl OpenTdbProvider {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }

    /// Use a different API endpoint and request timeout.
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn query(config: &QuizConfig) -> Vec<(&'static str, String)> {
        let mut query = vec![("amount", config.question_count().to_string())];
        // Category 0 means "any category" and is left off the request.
        if config.category_id() != 0 {
            query.push(("category", config.category_id().to_string()));
        }
        query.push(("difficulty", config.difficulty().to_string()));
        query.push(("type", "multiple".to_string()));
        query
    }
}

#[async_trait]
impl QuestionProvider for OpenTdbProvider {
    fn name(&self) -> &str {
        "opentdb"
    }

    async fn fetch(&self, config: &QuizConfig) -> Result<Vec<Question>, ProviderError> {
        debug!(endpoint = %self.endpoint, ?config, "requesting questions");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&Self::query(config))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}
