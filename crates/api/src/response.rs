//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "success": bool, ... }` envelope. Use
//! [`ApiResponse`] instead of ad-hoc `serde_json::json!` blocks to get
//! compile-time type safety and consistent serialization; errors produce
//! the matching `{ "success": false, "error": ... }` shape via `AppError`.

use serde::Serialize;

/// Standard success envelope: `{ "success": true, "message"?, "data"? }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success envelope carrying a data payload.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Success envelope carrying both a message and a data payload.
    pub fn message_with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}
