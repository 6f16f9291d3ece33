//! Lookup error taxonomy and its HTTP mapping.
//!
//! Every variant is terminal and user-facing. Messages are the deployed
//! Russian texts; clients distinguish cases by status code and message.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use refbook_loader::StoreError;
use refbook_types::VersionId;
use thiserror::Error;

/// Why no version could be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionMiss {
    /// An explicitly requested version label does not exist.
    Explicit,
    /// No version has started as of the reference date.
    Current,
    /// Neither the requested label nor a current version matched
    /// (element existence check).
    NoValid,
}

impl VersionMiss {
    /// The user-facing message for this case.
    pub fn message(&self) -> &'static str {
        match self {
            VersionMiss::Explicit => "Указанная версия не найдена",
            VersionMiss::Current => "Текущая версия не найдена",
            VersionMiss::NoValid => "Не найдено валидной версии справочника.",
        }
    }
}

impl fmt::Display for VersionMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors returned by the lookup operations.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The `date` parameter is not a `YYYY-MM-DD` calendar date. HTTP 400.
    #[error("Неверный формат даты. Ожидается ГГГГ-ММ-ДД.")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// No refbook has the requested id. HTTP 404.
    #[error("Справочник не найден")]
    RefbookNotFound {
        /// The requested id as received.
        id: String,
    },

    /// No version matched the selector. HTTP 404.
    #[error("{0}")]
    VersionNotFound(VersionMiss),

    /// The resolved version has no elements. HTTP 404.
    #[error("Элементы не найдены для указанной версии")]
    ElementsNotFound {
        /// The resolved version.
        version_id: VersionId,
    },

    /// `code` or `value` was missing or empty. HTTP 400.
    #[error("Параметры 'code' и 'value' обязательны.")]
    MissingParameters,

    /// The query string could not be decoded. HTTP 400.
    #[error("Неверные параметры запроса.")]
    InvalidQuery {
        /// Why decoding failed.
        reason: String,
    },

    /// The storage backend failed. HTTP 500.
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// Body sent for storage failures; backend details stay in the logs.
const INTERNAL_ERROR_DETAIL: &str = "Внутренняя ошибка сервера";

impl LookupError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::InvalidDate { .. }
            | LookupError::MissingParameters
            | LookupError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            LookupError::RefbookNotFound { .. }
            | LookupError::VersionNotFound(_)
            | LookupError::ElementsNotFound { .. } => StatusCode::NOT_FOUND,
            LookupError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `detail` text sent to clients.
    pub fn detail(&self) -> String {
        match self {
            LookupError::Storage(_) => INTERNAL_ERROR_DETAIL.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Lookup failed: {}", self);
        } else {
            tracing::debug!("Lookup rejected: {:?}", self);
        }
        let body = serde_json::json!({ "detail": self.detail() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            LookupError::InvalidDate { value: "x".into() }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(LookupError::MissingParameters.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            LookupError::InvalidQuery { reason: "x".into() }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LookupError::RefbookNotFound { id: "1".into() }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LookupError::VersionNotFound(VersionMiss::Current).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LookupError::ElementsNotFound { version_id: 1 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LookupError::Storage(StoreError::Unavailable("down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_version_miss_messages_are_distinct() {
        assert_eq!(
            LookupError::VersionNotFound(VersionMiss::Explicit).to_string(),
            "Указанная версия не найдена"
        );
        assert_eq!(
            LookupError::VersionNotFound(VersionMiss::Current).to_string(),
            "Текущая версия не найдена"
        );
        assert_eq!(
            LookupError::VersionNotFound(VersionMiss::NoValid).to_string(),
            "Не найдено валидной версии справочника."
        );
    }

    #[test]
    fn test_storage_detail_is_opaque() {
        let err = LookupError::Storage(StoreError::Unavailable("connection refused".into()));
        assert_eq!(err.detail(), INTERNAL_ERROR_DETAIL);
        assert!(err.to_string().contains("connection refused"));
    }
}
