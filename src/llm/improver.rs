// Improver - Select, prompt, generate and splice
//
// Takes the selection (or the sentence before the cursor), sends it to the
// generation client with a prompt built from the current settings, and
// replaces the original text with the model's answer.

use sha2::{Digest, Sha256};

use crate::editor::{Notifier, TextBuffer};
use crate::llm::client::{ClientError, GenerationClient};
use crate::llm::config::Settings;
use crate::llm::prompts::build_improvement_prompt;
use crate::llm::sentence_detector::locate_in_buffer;
use crate::llm_types::{compute_diff, GenerateContentRequest, GenerationRequest, Improvement};
use crate::position::Span;

/// Runs improvement requests against a host buffer
pub struct Improver<C> {
    client: C,
    settings: Settings,
}

impl<C: GenerationClient> Improver<C> {
    pub fn new(client: C, settings: Settings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings snapshot used for subsequent requests
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Pick the text to improve: the selection, else the sentence before the cursor
    pub fn resolve_target<B: TextBuffer + ?Sized>(
        &self,
        buffer: &B,
    ) -> Result<(Span, String), ImproveError> {
        if !self.settings.has_api_key() {
            return Err(ImproveError::MissingApiKey);
        }

        if let Some(selected) = buffer.selected_text() {
            return Ok(selected);
        }

        let sentence = locate_in_buffer(buffer).ok_or(ImproveError::NoSentence)?;
        Ok((sentence.span(), sentence.text))
    }

    /// Improve the target text and splice the result into the buffer
    pub async fn improve<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
    ) -> Result<Improvement, ImproveError> {
        let (span, text) = self.resolve_target(buffer)?;
        self.improve_span(buffer, span, text).await
    }

    /// Same as `improve`, reporting progress and failures through `notifier`
    ///
    /// Never returns an error: failures leave the buffer untouched and are
    /// shown to the user instead.
    pub async fn send<B, N>(&self, buffer: &mut B, notifier: &N) -> Option<Improvement>
    where
        B: TextBuffer + ?Sized,
        N: Notifier + ?Sized,
    {
        let result = match self.resolve_target(buffer) {
            Ok((span, text)) => {
                notifier.notice("Sending text to Gemini for improvement...");
                self.improve_span(buffer, span, text).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(improvement) => {
                notifier.notice("Text improved by Gemini");
                Some(improvement)
            }
            Err(e) => {
                tracing::warn!("send: {}", e);
                notifier.notice(&e.notice());
                None
            }
        }
    }

    async fn improve_span<B: TextBuffer + ?Sized>(
        &self,
        buffer: &mut B,
        span: Span,
        text: String,
    ) -> Result<Improvement, ImproveError> {
        let prompt = build_improvement_prompt(&text, &self.settings.configuration());
        let request = GenerationRequest {
            model: self.settings.model.clone(),
            api_key: self.settings.api_key.clone(),
            body: GenerateContentRequest::from_prompt(&prompt),
        };

        tracing::info!(
            "improve: model={} text_len={} fingerprint={}",
            request.model,
            text.len(),
            fingerprint(&text)
        );

        let response = self.client.generate(&request).await?;
        let improved = response.improved_text().ok_or_else(|| {
            tracing::warn!(
                "improve: response had no usable text, candidates={}",
                response.candidates.len()
            );
            ImproveError::EmptyResponse
        })?;

        buffer.replace_range(&improved, span.start, span.end);

        Ok(Improvement {
            id: uuid::Uuid::new_v4().to_string(),
            span,
            diff: compute_diff(&text, &improved),
            original_text: text,
            improved_text: improved,
        })
    }
}

/// Short hash used to correlate log lines without logging user text
fn fingerprint(text: &str) -> String {
    Sha256::digest(text.as_bytes())
        .iter()
        .take(6)
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Error type for the improvement workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImproveError {
    MissingApiKey,
    NoSentence,
    Client(ClientError),
    EmptyResponse,
}

impl ImproveError {
    /// Message suitable for a user-facing notice
    pub fn notice(&self) -> String {
        match self {
            Self::MissingApiKey => {
                "Please configure your Gemini API key in plugin settings".to_string()
            }
            Self::NoSentence => "No sentence found to improve.".to_string(),
            Self::Client(e) => format!("Error: {e}"),
            Self::EmptyResponse => "Gemini returned an empty response.".to_string(),
        }
    }
}

impl std::fmt::Display for ImproveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "No API key configured"),
            Self::NoSentence => write!(f, "No sentence before the cursor"),
            Self::Client(e) => write!(f, "Generation request failed: {e}"),
            Self::EmptyResponse => write!(f, "Response contained no improved text"),
        }
    }
}

impl std::error::Error for ImproveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClientError> for ImproveError {
    fn from(e: ClientError) -> Self {
        Self::Client(e)
    }
}
