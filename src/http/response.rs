//! Dispatch results as HTTP responses.
//!
//! # Design Decisions
//! - Successful replies are JSON with the status the dispatcher settled
//! - Errors are a plain-text message with the error's status code
//! - Encoding failures are logged; the client only sees a 500

use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::routing::{DispatchError, Dispatched};

impl IntoResponse for Dispatched {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use serde_json::json;

    #[test]
    fn test_dispatched_is_json() {
        let response = Dispatched {
            route: "/users".into(),
            status: StatusCode::CREATED,
            body: json!({ "id": 2 }),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_error_is_plain_text() {
        let response = DispatchError::NotFound {
            method: "GET".into(),
            path: "/unknown".into(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }
}
