//! Uniform JSON envelope for every response:
//! `{success, message, data?, error?, total?}`. `error` appears only on
//! failures, `total` only on list responses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            error: None,
            total: None,
        }
    }

    pub fn success_list(message: &str, data: T, total: i64) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
            error: None,
            total: Some(total),
        }
    }
}

impl ApiResponse<()> {
    /// Bare acknowledgment with no data payload.
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: None,
            error: None,
            total: None,
        }
    }

    pub fn error(message: &str, error: String) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
            error: Some(error),
            total: None,
        }
    }
}
