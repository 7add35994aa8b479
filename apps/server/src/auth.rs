use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::main_lib::AppState;

/// Kind of account behind a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Donor,
    Organization,
}

impl UserRole {
    fn as_str(&self) -> &'static str {
        match self {
            UserRole::Donor => "donor",
            UserRole::Organization => "organization",
        }
    }
}

/// Claims issued by the login service. `sub` is the opaque user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: UserRole,
    pub exp: usize,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    Forbidden(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    code: u16,
    message: String,
}

pub struct AuthManager {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthManager {
    pub fn new(jwt_secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!("Rejected bearer token: {:?}", err.kind());
                AuthError::Unauthorized
            })
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AuthError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };
        let body = Json(AuthErrorBody {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

/// Extracts the token of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return None;
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// The authenticated caller of a request.
#[derive(Debug, Clone)]
pub struct Requester {
    pub user_id: String,
    pub role: UserRole,
}

impl Requester {
    /// Returns the caller's user id when they hold `role`.
    pub fn require(&self, role: UserRole) -> Result<&str, AuthError> {
        if self.role == role {
            Ok(&self.user_id)
        } else {
            Err(AuthError::Forbidden(format!(
                "This action requires a {} account",
                role.as_str()
            )))
        }
    }
}

impl FromRequestParts<Arc<AppState>> for Requester {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Without a configured secret no token can be trusted.
        let auth = state.auth.as_ref().ok_or(AuthError::Unauthorized)?;
        let token = bearer_token(&parts.headers).ok_or(AuthError::Unauthorized)?;
        let claims = auth.validate_token(token)?;
        Ok(Requester {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
