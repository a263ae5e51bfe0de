use serde::{Deserialize, Serialize};
use serde_json::Value;

// -- Response codes --

pub const CODE_OK: i32 = 0;
/// Client supplied a missing or invalid parameter.
pub const CODE_ERR_PARAM: i32 = 1001;
/// The store failed to carry out the operation.
pub const CODE_ERR_APP: i32 = 1002;

// -- Envelope --

/// Every endpoint answers with this envelope, whatever the outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

impl ApiResponse {
    pub fn ok(data: Option<Value>) -> Self {
        Self {
            code: CODE_OK,
            message: "success".to_string(),
            data,
        }
    }

    pub fn param_error(message: impl Into<String>) -> Self {
        Self {
            code: CODE_ERR_PARAM,
            message: message.into(),
            data: None,
        }
    }

    pub fn app_error(message: impl Into<String>) -> Self {
        Self {
            code: CODE_ERR_APP,
            message: message.into(),
            data: None,
        }
    }
}

// -- Bodies --

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub list: Vec<T>,
    pub total: u64,
}

/// Unpaginated list, no total.
#[derive(Debug, Serialize, Deserialize)]
pub struct MultiResponse<T> {
    pub list: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse<T> {
    pub detail: T,
}
