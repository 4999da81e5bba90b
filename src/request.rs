//! Request/response shapes of the conversion endpoint.
//!
//! Field names follow the wire format (`originalText`, `rulesApplied`, ...).
//! Routing and persistence live outside this crate; these types are the
//! whole contract between them and [`Converter::respond`](crate::Converter::respond).
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("text is required")]
    MissingText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    #[serde(default)]
    pub text: String,
    /// Opaque configuration id. Carried through, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,
}

impl ConvertRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            config_id: None,
        }
    }

    pub fn with_config_id(mut self, id: impl Into<String>) -> Self {
        self.config_id = Some(id.into());
        self
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.text.is_empty() {
            return Err(RequestError::MissingText);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub original_text: String,
    pub converted_text: String,
    /// Number of active rules the conversion considered.
    pub rules_applied: usize,
}
