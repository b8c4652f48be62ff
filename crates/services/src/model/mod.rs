//! The external model collaborator.

mod gemini;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ModelError;

pub use gemini::GeminiClient;

/// One piece of the user turn sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPart {
    Text(String),
    InlineImage { mime_type: String, data: Arc<[u8]> },
}

/// A single structured-output request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub system_instruction: String,
    pub parts: Vec<RequestPart>,
    pub response_schema: serde_json::Value,
    pub temperature: f32,
}

impl ModelRequest {
    /// All text parts joined by newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                RequestPart::Text(text) => Some(text.as_str()),
                RequestPart::InlineImage { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, RequestPart::InlineImage { .. }))
    }
}

/// Request/response access to a structured-output model.
///
/// Implementations return the raw reply text; decoding against the schema is
/// the caller's job.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Whether credentials are present. Unconfigured clients still exist but
    /// fail every call with `ModelError::Disabled`.
    fn is_configured(&self) -> bool {
        true
    }

    /// Send the request and return the reply text.
    ///
    /// # Errors
    ///
    /// Returns `ModelError` when the call cannot be made or yields no text.
    async fn generate(&self, request: &ModelRequest) -> Result<String, ModelError>;
}
