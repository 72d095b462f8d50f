//! Error types for the HTTP boundary.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use clinic_domain::DomainError;
use serde_json::json;
use thiserror::Error;

/// Mensaje fijo para cualquier fallo no clasificado.
pub const INTERNAL_MESSAGE: &str = "Something went wrong.";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route does not exist.";

/// Errores que un handler puede devolver.
///
/// Se serializan como `{"msg": ...}`; `Internal` se registra con su detalle
/// y al cliente sólo le llega `INTERNAL_MESSAGE`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),
  #[error("{0}")]
  BadRequest(String),
  #[error("internal error: {0}")]
  Internal(String),
}

impl ApiError {
  pub const fn status_code(&self) -> StatusCode {
    match self {
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<DomainError> for ApiError {
  fn from(e: DomainError) -> Self {
    match e {
      DomainError::NotFound(msg) => Self::NotFound(msg),
      DomainError::Validation(msg) => Self::BadRequest(msg),
      DomainError::Storage(detail) => Self::Internal(detail),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status_code();
    let msg = match self {
      Self::NotFound(msg) | Self::BadRequest(msg) => msg,
      Self::Internal(detail) => {
        log::error!("Internal Server Error: {}", detail);
        INTERNAL_MESSAGE.to_string()
      }
    };
    (status, Json(json!({ "msg": msg }))).into_response()
  }
}

/// Fallback del router para rutas que no existen. Usa `error` en lugar de
/// `msg`.
pub async fn route_not_found() -> Response {
  (StatusCode::NOT_FOUND, Json(json!({ "error": ROUTE_NOT_FOUND_MESSAGE }))).into_response()
}
