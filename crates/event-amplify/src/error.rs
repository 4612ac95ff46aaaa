use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::catalog::repository::RepositoryError;
use crate::workflows::events::ClassificationError;
use crate::workflows::seed::SeedImportError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Seed(SeedImportError),
    Classification(ClassificationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Seed(err) => write!(f, "seed error: {}", err),
            AppError::Classification(err) => write!(f, "classification error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Seed(err) => Some(err),
            AppError::Classification(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Seed(SeedImportError::Repository(RepositoryError::Conflict)) => {
                StatusCode::CONFLICT
            }
            AppError::Seed(SeedImportError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Seed(_) => StatusCode::BAD_REQUEST,
            AppError::Classification(ClassificationError::Lookup(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Classification(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SeedImportError> for AppError {
    fn from(value: SeedImportError) -> Self {
        Self::Seed(value)
    }
}

impl From<ClassificationError> for AppError {
    fn from(value: ClassificationError) -> Self {
        Self::Classification(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_errors_map_to_client_errors() {
        let response = AppError::Seed(SeedImportError::BlankName { row: 3 }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            AppError::Seed(SeedImportError::Repository(RepositoryError::Conflict)).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn unavailable_store_during_import_is_a_server_error() {
        let err = AppError::from(SeedImportError::from(RepositoryError::Unavailable(
            "channelGroup store poisoned".to_string(),
        )));
        assert!(err
            .to_string()
            .starts_with("seed error: could not store channel group seed"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn display_prefixes_the_failing_layer() {
        let err = AppError::from(ClassificationError::MissingQuestion);
        assert_eq!(
            err.to_string(),
            "classification error: event has no question to classify"
        );
    }
}
