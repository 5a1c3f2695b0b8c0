// LLM Client - Transport for Gemini `generateContent` requests
//
// `GenerationClient` is the seam the improvement workflow talks to.
// `GeminiClient` implements it over HTTPS with reqwest (feature "gemini").

use std::future::Future;

use crate::llm_types::{GenerateContentResponse, GenerationRequest};

/// Default Gemini API root
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Sends one generation request and returns the decoded response
pub trait GenerationClient {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<GenerateContentResponse, ClientError>> + Send;
}

/// Error type for generation requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Request could not be sent or the connection failed
    Http(String),
    /// Server answered with a non-success status
    Status { status: u16, body: String },
    /// Response body was not the expected JSON
    Decode(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Status { status, body } if body.is_empty() => {
                write!(f, "Request failed with status {status}")
            }
            Self::Status { status, body } => {
                write!(f, "Request failed with status {status}: {body}")
            }
            Self::Decode(e) => write!(f, "Invalid response: {e}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// Build the `generateContent` URL for a model, without the API key
pub fn generate_content_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{model}:generateContent",
        base_url.trim_end_matches('/')
    )
}

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;

#[cfg(feature = "gemini")]
mod gemini {
    use std::time::Duration;

    use super::{generate_content_url, ClientError, GenerationClient, DEFAULT_BASE_URL};
    use crate::llm_types::{GenerateContentResponse, GenerationRequest};

    /// Maximum number of characters of an error body kept in `ClientError::Status`
    const MAX_ERROR_BODY: usize = 512;

    /// Gemini REST client
    #[derive(Debug, Clone)]
    pub struct GeminiClient {
        http: reqwest::Client,
        base_url: String,
    }

    impl GeminiClient {
        /// Create a client for the public Gemini endpoint
        pub fn new() -> Result<Self, ClientError> {
            Self::with_base_url(DEFAULT_BASE_URL, Duration::from_secs(60))
        }

        /// Create a client for another API root (proxies, tests)
        pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
            let http = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| ClientError::Http(e.to_string()))?;

            Ok(Self {
                http,
                base_url: base_url.to_string(),
            })
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    impl GenerationClient for GeminiClient {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GenerateContentResponse, ClientError> {
            let url = generate_content_url(&self.base_url, &request.model);
            tracing::info!("generate: POST model={}", request.model);

            let response = self
                .http
                .post(&url)
                .query(&[("key", request.api_key.as_str())])
                .json(&request.body)
                .send()
                .await
                .map_err(|e| ClientError::Http(e.without_url().to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!("generate: status={} body_len={}", status.as_u16(), body.len());
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body: body.chars().take(MAX_ERROR_BODY).collect(),
                });
            }

            let parsed = response
                .json::<GenerateContentResponse>()
                .await
                .map_err(|e| ClientError::Decode(e.without_url().to_string()))?;

            tracing::debug!("generate: candidates={}", parsed.candidates.len());
            Ok(parsed)
        }
    }
}
