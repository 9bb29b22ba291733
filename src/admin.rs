//! Typed transport boundary for the editing surface.
//!
//! The editing surface submits raw form fields and receives a plain
//! success/error envelope; these are the only shapes that cross the
//! boundary. Rendering the surrounding screens is out of scope.

use crate::auth::Token;
use crate::error::StyleError;
use crate::types::StyleId;
use serde::{Deserialize, Serialize};

/// Raw form fields submitted when saving a single style.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveStyleForm {
    /// Record to update; None creates a new record.
    pub id: Option<StyleId>,

    /// Title field.
    #[serde(default)]
    pub title: String,

    /// Slug field, as typed by the editor. May be empty.
    #[serde(default)]
    pub slug: String,

    /// Selected target block. Empty clears the assignment.
    #[serde(default)]
    pub block: String,

    /// CSS buffer contents.
    #[serde(default)]
    pub css: String,

    /// Anti-forgery token for the save scope.
    pub token: Token,
}

/// Raw fields for a bulk block assignment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BulkAssignForm {
    /// Records to update.
    pub ids: Vec<StyleId>,

    /// Block to assign. Empty clears the assignment on every record.
    #[serde(default)]
    pub block: String,

    /// Anti-forgery token for the bulk scope.
    pub token: Token,
}

/// Outcome of a bulk assignment. Skipped records are counted but not
/// identified; partial success is not reported per item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub updated: usize,
    pub skipped: usize,
}

/// Success/error envelope returned to the editing surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminResponse {
    pub success: bool,
    pub status: u16,
    pub message: String,
}

impl AdminResponse {
    /// Successful operation.
    pub fn ok() -> Self {
        Self {
            success: true,
            status: 200,
            message: String::new(),
        }
    }

    /// Failed operation with a status code and message token.
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status,
            message: message.into(),
        }
    }
}

impl From<&StyleError> for AdminResponse {
    fn from(err: &StyleError) -> Self {
        match err {
            StyleError::Forbidden => Self::error(403, "forbidden"),
            StyleError::InvalidToken => Self::error(403, "invalid_token"),
            StyleError::UnknownBlock(_) => Self::error(400, "invalid_block"),
            StyleError::StyleNotFound(_) => Self::error(404, "not_found"),
            _ => Self::error(500, "internal_error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_form_defaults() {
        let json = r#"{"id": null, "token": "abc"}"#;
        let form: SaveStyleForm = serde_json::from_str(json).unwrap();

        assert!(form.id.is_none());
        assert!(form.title.is_empty());
        assert!(form.css.is_empty());
        assert_eq!(form.token, Token("abc".to_string()));
    }

    #[test]
    fn test_error_mapping() {
        let response = AdminResponse::from(&StyleError::Forbidden);
        assert_eq!(response, AdminResponse::error(403, "forbidden"));

        let response = AdminResponse::from(&StyleError::UnknownBlock("x/y".into()));
        assert_eq!(response, AdminResponse::error(400, "invalid_block"));

        let response = AdminResponse::from(&StyleError::InvalidToken);
        assert_eq!(response, AdminResponse::error(403, "invalid_token"));
    }

    #[test]
    fn test_envelope_serde() {
        let ok = AdminResponse::ok();
        let json = serde_json::to_string(&ok).unwrap();
        let back: AdminResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(ok, back);
        assert!(back.success);
    }
}
