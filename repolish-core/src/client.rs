//! Chat-completion client for review rewriting
//!
//! Issues one outbound request per rewrite against an OpenAI-compatible
//! `/chat/completions` endpoint, wrapped in the bounded retry policy.
//! The API key is injected at construction; there is no ambient
//! credential state.

use reqwest::StatusCode;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::prompt::{build_messages, ChatMessage};
use crate::retry::RetryPolicy;
use crate::style::Style;
use crate::{Error, Result};

/// Maximum length of a response body quoted in error messages
const ERROR_SNIPPET_LEN: usize = 200;

/// Client for the review-improvement completion endpoint
pub struct ReviewClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    retry: RetryPolicy,
}

#[derive(Debug, serde::Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, serde::Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, serde::Deserialize)]
struct Choice {
    message: CompletionMessage,
}

#[derive(Debug, serde::Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: String,
}

impl ReviewClient {
    /// Create a client from provider settings and an injected API key
    pub fn new(
        provider: &ProviderConfig,
        api_key: impl Into<String>,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(provider.request_timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = format!(
            "{}/chat/completions",
            provider.api_base.trim_end_matches('/')
        );

        info!(endpoint = %endpoint, model = %provider.model, "Created review client");

        Ok(Self {
            http,
            endpoint,
            model: provider.model.clone(),
            api_key: api_key.into(),
            retry,
        })
    }

    /// Rewrite a review in the style named by a form label.
    ///
    /// Unknown labels fail with [`Error::UnknownStyle`] before any
    /// network activity.
    pub async fn improve(&self, review_text: &str, style_label: &str) -> Result<String> {
        let style = Style::from_label(style_label)?;
        self.improve_styled(review_text, style).await
    }

    /// Rewrite a review in the given style
    pub async fn improve_styled(&self, review_text: &str, style: Style) -> Result<String> {
        let messages = build_messages(review_text, style);
        let request = ChatRequest {
            model: &self.model,
            messages: &messages,
        };

        self.retry
            .run(|attempt| self.request_completion(&request, attempt))
            .await
    }

    /// Perform one completion request and extract the rewritten text
    async fn request_completion(
        &self,
        request: &ChatRequest<'_>,
        attempt: u32,
    ) -> Result<String> {
        debug!(attempt, model = %self.model, "Requesting completion");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;

        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        extract_content(&body)
    }
}

impl std::fmt::Debug for ReviewClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Map transport-level failures onto the retryable connection class
fn classify_transport(err: reqwest::Error) -> Error {
    Error::Connection(err.to_string())
}

/// Map a non-success HTTP status onto the error taxonomy
fn classify_status(status: StatusCode, body: &str) -> Error {
    let detail = format!("{}: {}", status, snippet(body));
    match status {
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited(detail),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth(detail),
        status if status.is_client_error() => Error::BadRequest(detail),
        _ => Error::Api(detail),
    }
}

/// Extract the first choice's message content from a completion body
fn extract_content(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| Error::InvalidResponse(format!("{} in body {}", e, snippet(body))))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::InvalidResponse("no choices in response".to_string()))?
        .message
        .content;

    let content = content.trim();
    if content.is_empty() {
        return Err(Error::EmptyResponse);
    }
    Ok(content.to_string())
}

fn snippet(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(ERROR_SNIPPET_LEN)
        .map_or(body.len(), |(i, _)| i);
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> ReviewClient {
        ReviewClient::new(&ProviderConfig::default(), "sk-test", RetryPolicy::default())
            .unwrap()
    }

    #[tokio::test]
    async fn test_unknown_style_fails_before_network() {
        // The endpoint is never contacted; the lookup fails first
        let err = test_client()
            .improve("Great product.", "Sarcastic")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownStyle(_)));
    }

    #[test]
    fn test_extract_content() {
        let body = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "A better review." } }
            ]
        }"#;
        assert_eq!(extract_content(body).unwrap(), "A better review.");
    }

    #[test]
    fn test_extract_content_takes_first_choice() {
        let body = r#"{
            "choices": [
                { "message": { "content": "first" } },
                { "message": { "content": "second" } }
            ]
        }"#;
        assert_eq!(extract_content(body).unwrap(), "first");
    }

    #[test]
    fn test_extract_content_no_choices() {
        let err = extract_content(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[test]
    fn test_extract_content_empty_text() {
        let body = r#"{"choices": [{ "message": { "content": "   " } }]}"#;
        assert!(matches!(
            extract_content(body).unwrap_err(),
            Error::EmptyResponse
        ));
    }

    #[test]
    fn test_extract_content_malformed_json() {
        let err = extract_content("<html>gateway</html>").unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            Error::RateLimited(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "bad key"),
            Error::Auth(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, "bad model"),
            Error::BadRequest(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, "oops"),
            Error::Api(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, "oops"),
            Error::Api(_)
        ));
    }

    #[test]
    fn test_retryable_statuses_match_policy() {
        // 429 and 5xx retry, 4xx and auth failures do not
        assert!(classify_status(StatusCode::TOO_MANY_REQUESTS, "").is_transient());
        assert!(classify_status(StatusCode::SERVICE_UNAVAILABLE, "").is_transient());
        assert!(!classify_status(StatusCode::UNAUTHORIZED, "").is_transient());
        assert!(!classify_status(StatusCode::UNPROCESSABLE_ENTITY, "").is_transient());
    }

    #[test]
    fn test_snippet_truncates_long_bodies() {
        let long = "x".repeat(1000);
        assert_eq!(snippet(&long).len(), ERROR_SNIPPET_LEN);
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn test_request_wire_format() {
        let messages = build_messages("text", Style::AutoImprove);
        let request = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
        };
        let value: serde_json::Value =
            serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["messages"].as_array().unwrap().len(), 2);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
    }
}
