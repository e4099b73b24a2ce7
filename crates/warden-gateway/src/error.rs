//! API error types and responses.
//!
//! This module defines the standard error format for all API responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use warden_control::{ControlError, HostError};

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller is not authenticated or not allowed. Deliberately
    /// carries no further detail.
    #[error("forbidden")]
    Forbidden,

    /// The named operation was invoked again inside its cooldown window.
    #[error("operation already called")]
    CooldownActive,

    /// The main instance must be running for this operation.
    #[error("main server isn't running")]
    InstanceNotRunning,

    /// The downstream host API rejected the command.
    #[error("host API returned {status}: {body}")]
    HostRejected {
        /// The HTTP status the host returned.
        status: u16,
        /// The response body the host returned.
        body: String,
    },

    /// The downstream host API could not be reached.
    #[error("host API didn't respond")]
    HostUnreachable,

    /// The vendor API failed hard.
    #[error("provider error: {0}")]
    Provider(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::CooldownActive | Self::InstanceNotRunning => StatusCode::BAD_REQUEST,
            Self::HostRejected { .. }
            | Self::HostUnreachable
            | Self::Provider(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Forbidden => "forbidden",
            Self::CooldownActive => "cooldown_active",
            Self::InstanceNotRunning => "instance_not_running",
            Self::HostRejected { .. } => "host_rejected",
            Self::HostUnreachable => "host_unreachable",
            Self::Provider(_) => "provider_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ControlError> for ApiError {
    fn from(err: ControlError) -> Self {
        match err {
            ControlError::InstanceNotRunning => Self::InstanceNotRunning,
            ControlError::CallbackAddressMismatch => Self::Forbidden,
            ControlError::Host(HostError::UnexpectedStatus { status, body }) => {
                Self::HostRejected { status, body }
            }
            ControlError::Host(HostError::Unreachable(detail)) => {
                tracing::error!(error = %detail, "Host API unreachable");
                Self::HostUnreachable
            }
            ControlError::Host(HostError::Malformed(detail)) => {
                tracing::error!(error = %detail, "Host API payload unreadable");
                Self::Internal("host API returned an unreadable payload".to_string())
            }
            ControlError::Provider(provider_err) => {
                tracing::error!(error = %provider_err, "Provider error");
                Self::Provider(provider_err.to_string())
            }
        }
    }
}
