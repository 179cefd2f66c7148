//! # Authentication Module
//!
//! JWT bearer tokens for the onboarding API.
//!
//! ## Usage
//!
//! Obtain a token from `POST /api/auth/login`, then send it on every
//! protected request:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! `/health`, `/api/auth/register` and `/api/auth/login` are public.
//! `/api/admin/*` additionally requires the admin role.

use super::{AppState, error::ApiError};
use crate::config::AuthConfig;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use onboard_core::{EmployeeId, EmployeeRecord, Role};
use rand::{Rng, distributions::Alphanumeric};
use serde::{Deserialize, Serialize};

/// Length of a generated signing secret.
const EPHEMERAL_SECRET_LENGTH: usize = 64;

// =============================================================================
// CLAIMS
// =============================================================================

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Employee id.
    pub sub: String,
    pub email: String,
    #[serde(rename = "type")]
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated caller, inserted into request extensions by
/// [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: EmployeeId,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = ApiError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = EmployeeId::parse(&claims.sub).map_err(|_| ApiError::Unauthorized)?;
        Ok(Self {
            id,
            email: claims.email,
            role: claims.role,
        })
    }
}

// =============================================================================
// TOKEN SERVICE
// =============================================================================

/// Issues and validates HS256 access tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime_minutes", &self.lifetime.num_minutes())
            .finish_non_exhaustive()
    }
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &str, token_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::minutes(token_minutes),
        }
    }

    /// Build from the `[auth]` section, generating a secret when none is set.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        match config.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => Self::new(secret, config.token_minutes),
            None => {
                tracing::warn!(
                    "No JWT secret configured (ONBOARD_JWT_SECRET). Using an ephemeral key; \
                     tokens will not survive a restart."
                );
                Self::new(&generate_secret(), config.token_minutes)
            }
        }
    }

    /// Issue a token for `record`.
    pub fn issue(&self, record: &EmployeeRecord) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: record.id.to_string(),
            email: record.email.clone(),
            role: record.role,
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Token generation failed");
            ApiError::Core(onboard_core::OnboardError::CredentialError(e.to_string()))
        })
    }

    /// Validate a token and return its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ApiError::TokenExpired,
                _ => ApiError::Unauthorized,
            })
    }

    /// Extract the token from an `Authorization` header value.
    pub fn extract_from_header(value: &str) -> Option<&str> {
        value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(EPHEMERAL_SECRET_LENGTH)
        .map(char::from)
        .collect()
}

// =============================================================================
// MIDDLEWARE
// =============================================================================

/// Require a valid bearer token.
///
/// On success the caller's [`CurrentUser`] is available to handlers through
/// `Extension<CurrentUser>`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(TokenService::extract_from_header);

    let Some(token) = token else {
        tracing::warn!(
            event = "auth_failure",
            reason = "missing_authorization_header",
            uri = %req.uri(),
            "Missing or malformed Authorization header"
        );
        return Err(ApiError::Unauthorized);
    };

    match state.tokens.validate(token).and_then(CurrentUser::try_from) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(
                event = "auth_failure",
                reason = %e,
                uri = %req.uri(),
                "Token rejected"
            );
            Err(e)
        }
    }
}

/// Require the admin role. Must run after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(ApiError::Unauthorized)?;

    if !user.is_admin() {
        tracing::warn!(
            event = "admin_required",
            user_id = %user.id,
            uri = %req.uri(),
            "Admin access denied"
        );
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(req).await)
}

// =============================================================================
// TESTS
// =============================================================================
