//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::services::validator::ValidationError;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {message} (id: {id})")]
    NotFound { id: String, message: &'static str },

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Cuerpo que no se pudo leer como objeto JSON; guarda el detalle del parser
    #[error("Invalid body: {0}")]
    InvalidBody(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

const INVALID_BODY_MESSAGE: &str = "El cuerpo de la solicitud no es un JSON válido";

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl AppError {
    /// Código HTTP asociado al error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(e) if e.is_conflict() => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                let error = if e.is_conflict() { "Conflict" } else { "Validation Error" };
                ErrorResponse {
                    error: error.to_string(),
                    message: e.message().to_string(),
                    details: None,
                    code: Some(e.code().to_string()),
                }
            }

            AppError::NotFound { id, message } => {
                warn!("Resource not found: {} (id: {})", message, id);
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: message.to_string(),
                    details: Some(json!({ "id": id })),
                    code: Some("NOT_FOUND".to_string()),
                }
            }

            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code: Some("BAD_REQUEST".to_string()),
                }
            }

            AppError::InvalidBody(detail) => {
                warn!("Invalid request body: {}", detail);
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: INVALID_BODY_MESSAGE.to_string(),
                    details: Some(json!({ "parse_error": detail })),
                    code: Some("INVALID_BODY".to_string()),
                }
            }

            AppError::Storage(msg) => {
                error!("Storage error: {}", msg);
                ErrorResponse {
                    error: "Storage Error".to_string(),
                    message: "Error interno del servidor".to_string(),
                    details: None,
                    code: Some("STORAGE_ERROR".to_string()),
                }
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "Error interno del servidor".to_string(),
                    details: None,
                    code: Some("INTERNAL_ERROR".to_string()),
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(message: &'static str, id: impl ToString) -> AppError {
    AppError::NotFound {
        id: id.to_string(),
        message,
    }
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

/// Función helper para crear errores internos
pub fn internal_error(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_body_keeps_parser_detail_out_of_message() {
        let detail = "Failed to parse the request body as JSON: key must be a string at line 1 column 3";
        let (status, body) = body_of(AppError::InvalidBody(detail.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "El cuerpo de la solicitud no es un JSON válido");
        assert_eq!(body["code"], "INVALID_BODY");
        assert_eq!(body["details"]["parse_error"], detail);
    }

    #[tokio::test]
    async fn test_storage_error_hides_cause() {
        let (status, body) = body_of(AppError::Storage("pool cerrado".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Error interno del servidor");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let err = AppError::from(ValidationError::Conflict("duplicado".to_string()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::from(ValidationError::MissingFields("faltan".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::from(ValidationError::InvalidFormat("formato".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_and_storage_status() {
        assert_eq!(not_found_error("Cliente no encontrado", 42).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Storage("pool cerrado".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
