//! Error → HTTP mapping and the shared JSON error envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use chamados_auth::{PasswordError, TokenError};
use chamados_core::DomainError;
use chamados_infra::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Missing or invalid credentials. Always 401, message included verbatim.
    #[error("{0}")]
    Auth(&'static str),

    /// Driver fault. Detail is logged here and withheld from the client.
    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("password hashing failed: {0}")]
    Senha(#[from] PasswordError),

    #[error("token emission failed: {0}")]
    Token(#[from] TokenError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(e) => ApiError::Domain(e),
            StoreError::Database(e) => ApiError::Database(e),
        }
    }
}

impl ApiError {
    fn status_e_codigo(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Domain(DomainError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "validation_error")
            }
            ApiError::Domain(DomainError::Conflict(_)) => (StatusCode::BAD_REQUEST, "conflict"),
            ApiError::Domain(DomainError::Referential(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_reference")
            }
            ApiError::Domain(DomainError::NotFound) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Domain(DomainError::Forbidden(_)) => (StatusCode::FORBIDDEN, "forbidden"),
            ApiError::Auth(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Database(_) | ApiError::Senha(_) | ApiError::Token(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, codigo) = self.status_e_codigo();
        let mensagem = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(erro = %self, "falha interna ao atender requisição");
            "erro interno".to_string()
        } else {
            self.to_string()
        };
        json_error(status, codigo, mensagem)
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
