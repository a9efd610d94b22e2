use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success envelope wrapping every 2xx payload:
/// `{ success: true, status_code, data?, message? }`.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 200 response with a data payload.
pub fn ok<T: Serialize>(data: T) -> Response {
    envelope(StatusCode::OK, Some(data), None)
}

/// 201 response with a data payload.
pub fn created<T: Serialize>(data: T) -> Response {
    envelope(StatusCode::CREATED, Some(data), None)
}

/// Response carrying only a message.
pub fn message(status: StatusCode, message: impl Into<String>) -> Response {
    envelope::<()>(status, None, Some(message.into()))
}

fn envelope<T: Serialize>(status: StatusCode, data: Option<T>, message: Option<String>) -> Response {
    let body = SuccessResponse {
        success: true,
        status_code: status.as_u16(),
        data,
        message,
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn data_envelope_shape() {
        let response = created(serde_json::json!({"id": 1}));
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["success"], true);
        assert_eq!(payload["status_code"], 201);
        assert_eq!(payload["data"]["id"], 1);
        assert!(payload.get("message").is_none());
    }

    #[tokio::test]
    async fn message_envelope_shape() {
        let response = message(StatusCode::OK, "Welcome");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["message"], "Welcome");
        assert!(payload.get("data").is_none());
    }
}
