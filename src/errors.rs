use crate::validate::FieldErrors;
use axum::http::StatusCode;
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("{0}")]
    RequestFailed(String),

    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub fields: Option<FieldErrors>,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            fields: None,
        }
    }

    pub fn invalid(fields: FieldErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "validation failed".to_string(),
            fields: Some(fields),
        }
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_IMPLEMENTED,
            message: message.into(),
            fields: None,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self.fields {
            Some(fields) => (
                self.status,
                Json(serde_json::json!({ "message": self.message, "errors": fields })),
            )
                .into_response(),
            None => (self.status, self.message).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_displays_server_message() {
        let err = GatewayError::RequestFailed("Request failed (503)".to_string());
        assert_eq!(err.to_string(), "Request failed (503)");
    }

    #[test]
    fn invalid_carries_field_errors() {
        let mut fields = FieldErrors::default();
        fields.push(crate::validate::Field::Email, "Email is required");
        let err = AppError::invalid(fields);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.fields.as_ref().map(|f| f.len()), Some(1));
    }
}
