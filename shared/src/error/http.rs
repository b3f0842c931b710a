//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use super::types::{ApiResponse, AppError};
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 400 Bad Request
            Self::ValidationFailed | Self::InvalidRequest | Self::OrderEmpty => {
                StatusCode::BAD_REQUEST
            }

            // 404 Not Found
            Self::NotFound | Self::OrderNotFound | Self::ProductNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::OrderAlreadyFinalized => StatusCode::CONFLICT,

            // 502 Bad Gateway - the external processor failed, retryable
            Self::PaymentGatewayError | Self::PaymentVerificationFailed => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            Self::PaymentNotConfigured
            | Self::Unknown
            | Self::InternalError
            | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();

        // 5xx details stay in the log, not in the response body
        if status.is_server_error() {
            tracing::error!(code = u16::from(self.code), error = %self.message, "request failed");
        }

        (status, Json(ApiResponse::<()>::error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_errors_map_to_bad_gateway() {
        assert_eq!(
            ErrorCode::PaymentGatewayError.http_status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn missing_credentials_are_a_server_error() {
        assert_eq!(
            ErrorCode::PaymentNotConfigured.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn terminal_conflict_maps_to_409() {
        assert_eq!(
            ErrorCode::OrderAlreadyFinalized.http_status(),
            StatusCode::CONFLICT
        );
    }
}
