//! API Routes
//!
//! HTTP endpoint definitions. Wire names are camelCase and balances are
//! serialized as decimal strings, matching what existing clients parse.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{AccountNumber, Balance, Currency, IdentityRef, OperationContext, UserProfile};
use crate::error::AppError;
use crate::provisioning::{RegisterCommand, SignupCommand};

use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

/// All fields default to empty so a missing field is reported as a field
/// validation error, not a body-decoding error.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub full_name: String,
    pub country: String,
    pub contact_number: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub identity_ref: String,
    pub profile: ProfileResponse,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub identity_ref: String,
    /// None when the identity has no profile yet; callers treat this as a
    /// prompt to create one, not as an error.
    pub profile: Option<ProfileResponse>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub identity_ref: String,
    pub full_name: String,
    pub country: String,
    pub contact_number: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub account_number: AccountNumber,
    pub currency: Currency,
    pub balance: Balance,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            full_name: profile.full_name,
            email: profile.email,
            account_number: profile.account_number,
            currency: profile.currency,
            balance: profile.balance,
        }
    }
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Provisioning
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/users/register", post(register))
        // Lookup
        .route("/api/users/email/:email", get(get_user_by_email))
        .route("/api/users/:id", get(get_user_by_id))
}

// =========================================================================
// POST /api/auth/signup
// =========================================================================

/// Provision a new account: identity credentials plus financial profile.
async fn signup(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let command = SignupCommand::new(
        request.full_name,
        request.country,
        request.contact_number,
        request.email,
        request.password,
    );

    let provisioned = state.provisioner.signup(command, &context).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            identity_ref: provisioned.handle.uid.to_string(),
            profile: provisioned.profile.into(),
        }),
    ))
}

// =========================================================================
// POST /api/auth/login
// =========================================================================

/// Authenticate and fetch the financial profile for the session.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if request.email.trim().is_empty() || request.password.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "email and password are required".to_string(),
        ));
    }

    let handle = state
        .identity
        .authenticate(&request.email, &request.password)
        .await?;

    // Joined by the stable identity reference, not by email.
    let profile = state.lookup.find_by_identity(&handle.uid).await?;

    Ok(Json(LoginResponse {
        identity_ref: handle.uid.to_string(),
        profile: profile.map(ProfileResponse::from),
    }))
}

// =========================================================================
// POST /api/users/register
// =========================================================================

/// Create a profile for an identity that already exists at the provider.
async fn register(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let command = RegisterCommand::new(
        IdentityRef(request.identity_ref),
        request.full_name,
        request.country,
        request.contact_number,
        request.email,
    );

    let profile = state.provisioner.register_profile(command, &context).await?;

    Ok((StatusCode::CREATED, Json(profile.into())))
}

// =========================================================================
// GET /api/users/email/:email
// =========================================================================

/// Lookup profile by email
async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state
        .lookup
        .find_by_email(&email)
        .await?
        .ok_or(AppError::ProfileNotFound(email))?;

    Ok(Json(profile.into()))
}

// =========================================================================
// GET /api/users/:id
// =========================================================================

/// Lookup profile by numeric id
async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::InvalidRequest("Invalid user ID".to_string()))?;

    let profile = state
        .lookup
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::ProfileNotFound(id.to_string()))?;

    Ok(Json(profile.into()))
}
