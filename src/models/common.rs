use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 统一响应包装: {"success": true, "data": ...}
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_skips_empty_fields() {
        let body = serde_json::to_value(ApiResponse::success(3)).unwrap();
        assert_eq!(body, json!({ "success": true, "data": 3 }));

        let body = serde_json::to_value(ApiResponse::success_with_message(true, "已删除")).unwrap();
        assert_eq!(body, json!({ "success": true, "data": true, "message": "已删除" }));
    }
}
