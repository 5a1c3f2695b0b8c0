// LLM Types - Gemini wire format and improvement results
//
// Request/response bodies for the `generateContent` endpoint, plus the
// result handed back to the host after a successful replacement.

use serde::{Deserialize, Serialize};

use crate::position::Span;

/// Author of a content block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Body of a `generateContent` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single user turn carrying `prompt`
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some(Role::User),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// Body of a `generateContent` response
///
/// Every field is optional so that partial or blocked responses still
/// decode; `improved_text` decides whether anything usable came back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, trimmed
    ///
    /// `None` when any level is missing or the text is blank.
    pub fn improved_text(&self) -> Option<String> {
        let text = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()?
            .trim();

        (!text.is_empty()).then(|| text.to_string())
    }
}

/// An outbound generation request: model, credentials and body
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub api_key: String,
    pub body: GenerateContentRequest,
}

/// A completed in-place improvement
#[derive(Debug, Clone)]
pub struct Improvement {
    pub id: String,
    /// Where the original text was; the improved text now starts at `span.start`
    pub span: Span,
    pub original_text: String,
    pub improved_text: String,
    pub diff: Vec<DiffSegment>,
}

/// Diff segment for showing changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffKind {
    Unchanged,
    Added,
    Removed,
}

#[derive(Debug, Clone)]
pub struct DiffSegment {
    pub text: String,
    pub kind: DiffKind,
}

/// Compute a word-level diff between original and improved text
pub fn compute_diff(original: &str, improved: &str) -> Vec<DiffSegment> {
    use similar::{ChangeTag, TextDiff};

    let diff = TextDiff::from_words(original, improved);
    let mut segments: Vec<DiffSegment> = Vec::new();

    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => DiffKind::Unchanged,
            ChangeTag::Insert => DiffKind::Added,
            ChangeTag::Delete => DiffKind::Removed,
        };

        // Merge consecutive segments of the same kind
        if let Some(last) = segments.last_mut() {
            if last.kind == kind {
                last.text.push_str(change.value());
                continue;
            }
        }

        segments.push(DiffSegment {
            text: change.value().to_string(),
            kind,
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest::from_prompt("Improve this");
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value,
            json!({ "contents": [ { "role": "user", "parts": [ { "text": "Improve this" } ] } ] })
        );
    }

    #[test]
    fn test_improved_text_extracted_and_trimmed() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [ { "text": "  Better text.\n" } ] },
                  "finishReason": "STOP" }
            ],
            "usageMetadata": { "totalTokenCount": 12 }
        }))
        .unwrap();

        assert_eq!(response.improved_text(), Some("Better text.".to_string()));
    }

    #[test]
    fn test_improved_text_missing_levels() {
        let cases = [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [ {} ] }),
            json!({ "candidates": [ { "content": { "parts": [] } } ] }),
            json!({ "candidates": [ { "content": { "parts": [ {} ] } } ] }),
            json!({ "candidates": [ { "content": { "parts": [ { "text": "   " } ] } } ] }),
        ];

        for case in cases {
            let response: GenerateContentResponse = serde_json::from_value(case.clone()).unwrap();
            assert_eq!(response.improved_text(), None, "case: {case}");
        }
    }

    #[test]
    fn test_compute_diff() {
        let diff = compute_diff("their going home", "they're going home");

        assert!(!diff.is_empty());
        assert!(diff.iter().any(|s| s.kind == DiffKind::Removed && s.text.contains("their")));
        assert!(diff.iter().any(|s| s.kind == DiffKind::Added && s.text.contains("they're")));
        assert!(diff.iter().any(|s| s.kind == DiffKind::Unchanged));
    }

    #[test]
    fn test_compute_diff_identical() {
        let diff = compute_diff("same words", "same words");

        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].kind, DiffKind::Unchanged);
        assert_eq!(diff[0].text, "same words");
    }
}
