use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// Error details rendered inside the API error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

/// Error envelope returned for every failed request:
/// `{ success: false, status_code, error: { name, message, errors? } }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub status_code: u16,
    pub error: ErrorBody,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::error::DbErr),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(validator::ValidationErrors),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Forbidden resource")]
    Forbidden,

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("Upstream request failed: {0}")]
    ExternalApi(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::Validation(err)
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::ExternalApi(err.to_string())
    }
}

impl ServiceError {
    /// Single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) | Self::Token(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Hash(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Error name rendered in the envelope.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::BadRequest(_) => "BadRequest",
            Self::Validation(_) => "ValidationError",
            Self::Unauthorized(_) | Self::Token(_) => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::UnprocessableEntity(_) => "UnprocessableEntity",
            Self::ExternalApi(_) => "BadGateway",
            Self::Database(_) | Self::Hash(_) | Self::Other(_) => "InternalServerError",
        }
    }

    /// Message rendered in the envelope. Internal failures are flattened to a
    /// generic message so database/hashing details never leak to clients.
    pub fn response_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Hash(_) | Self::Other(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Structured sub-errors: per-field messages for validation failures.
    fn response_errors(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation(errors) => {
                let fields: Vec<_> = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| {
                            json!({
                                "field": field,
                                "message": e
                                    .message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string()),
                            })
                        })
                    })
                    .collect();
                Some(json!(fields))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            success: false,
            status_code: status.as_u16(),
            error: ErrorBody {
                name: self.name().to_string(),
                message: self.response_message(),
                errors: self.response_errors(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use sea_orm::error::DbErr;

    #[test]
    fn status_code_mapping() {
        assert_eq!(
            ServiceError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ServiceError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ServiceError::UnprocessableEntity("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServiceError::ExternalApi("x".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = ServiceError::Database(DbErr::Custom("secret dsn".into()));
        assert_eq!(err.response_message(), "Internal server error");

        let err = ServiceError::NotFound("Transaction not found".into());
        assert_eq!(err.response_message(), "Transaction not found");
    }

    #[tokio::test]
    async fn envelope_shape() {
        let response = ServiceError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["success"], false);
        assert_eq!(payload["status_code"], 403);
        assert_eq!(payload["error"]["name"], "Forbidden");
        assert_eq!(payload["error"]["message"], "Forbidden resource");
    }
}
