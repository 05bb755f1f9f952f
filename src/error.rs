//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::identity::IdentityError;
use crate::provisioning::ProvisioningError;
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    // Layer errors, classified below
    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // 404 Not Found
            AppError::ProfileNotFound(key) => {
                (StatusCode::NOT_FOUND, "profile_not_found", Some(key.clone()))
            }

            // Provisioning outcomes - every exit of the saga has one status
            AppError::Provisioning(ref err) => match err {
                ProvisioningError::Validation { field } => (
                    StatusCode::BAD_REQUEST,
                    "missing_field",
                    Some(field.to_string()),
                ),
                ProvisioningError::WeakCredential(detail) => (
                    StatusCode::BAD_REQUEST,
                    "weak_password",
                    Some(detail.clone()),
                ),
                ProvisioningError::DuplicateIdentity => {
                    (StatusCode::CONFLICT, "email_in_use", None)
                }
                ProvisioningError::DuplicateProfile => {
                    (StatusCode::CONFLICT, "profile_exists", None)
                }
                ProvisioningError::ProviderUnavailable(detail) => {
                    tracing::error!("Identity provider unavailable: {}", detail);
                    (StatusCode::BAD_GATEWAY, "identity_provider_unavailable", None)
                }
                ProvisioningError::ProvisioningFailed { cause } => {
                    tracing::error!("Provisioning failed, state is clean: {}", cause);
                    (StatusCode::INTERNAL_SERVER_ERROR, "provisioning_failed", None)
                }
                ProvisioningError::OrphanedIdentity { identity_ref, .. } => {
                    // Operator alert: the two systems are inconsistent.
                    tracing::error!(
                        uid = %identity_ref,
                        "Orphaned identity requires reconciliation: {}",
                        err
                    );
                    (StatusCode::INTERNAL_SERVER_ERROR, "orphaned_identity", None)
                }
            },

            // Identity provider errors (login path)
            AppError::Identity(ref err) => match err {
                IdentityError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "invalid_credentials", None)
                }
                IdentityError::UnknownIdentity => {
                    (StatusCode::NOT_FOUND, "unknown_identity", None)
                }
                IdentityError::NotFound => (StatusCode::NOT_FOUND, "identity_not_found", None),
                IdentityError::DuplicateIdentity => {
                    (StatusCode::CONFLICT, "email_in_use", None)
                }
                IdentityError::WeakCredential(detail) => (
                    StatusCode::BAD_REQUEST,
                    "weak_password",
                    Some(detail.clone()),
                ),
                IdentityError::ProviderUnavailable(detail) => {
                    tracing::error!("Identity provider unavailable: {}", detail);
                    (StatusCode::BAD_GATEWAY, "identity_provider_unavailable", None)
                }
            },

            // Store errors (lookup path)
            AppError::Store(ref err) => match err {
                StoreError::DuplicateAccountNumber
                | StoreError::DuplicateEmail
                | StoreError::DuplicateIdentityRef => {
                    (StatusCode::CONFLICT, "profile_exists", None)
                }
                StoreError::Unavailable(detail) => {
                    tracing::error!("Profile store unavailable: {}", detail);
                    (StatusCode::INTERNAL_SERVER_ERROR, "store_error", None)
                }
                StoreError::Corrupt(detail) => {
                    tracing::error!("Corrupt profile record: {}", detail);
                    (StatusCode::INTERNAL_SERVER_ERROR, "store_error", None)
                }
            },
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::from(ProvisioningError::Validation { field: "email" });
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_identity_maps_to_409() {
        let err = AppError::from(ProvisioningError::DuplicateIdentity);
        assert_eq!(status_of(err), StatusCode::CONFLICT);
    }

    #[test]
    fn test_provider_down_maps_to_502() {
        let err = AppError::from(ProvisioningError::ProviderUnavailable("timeout".into()));
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_login_distinguishes_unknown_account_from_wrong_password() {
        assert_eq!(
            status_of(AppError::from(IdentityError::UnknownIdentity)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::from(IdentityError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_store_unavailable_maps_to_500() {
        let err = AppError::from(StoreError::Unavailable("down".into()));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
