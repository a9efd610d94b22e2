//! Bearer-token authentication for the two account kinds: storefront
//! users (`role = "user"`) and dashboard operators (`role = "admin"`).
//! Both are HS256 JWTs signed with the shared application secret; guarded
//! routes fail closed when the token is missing, invalid or carries the
//! wrong role.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::AppState;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

/// Claim structure for issued tokens. `sub` is the user id for storefront
/// accounts and the operator username for dashboard accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token issuance and validation against the shared secret.
#[derive(Clone)]
pub struct AuthService {
    secret: String,
    user_token_ttl: Duration,
    operator_token_ttl: Duration,
}

impl AuthService {
    pub fn new(secret: String, user_ttl_secs: usize, operator_ttl_secs: usize) -> Self {
        Self {
            secret,
            user_token_ttl: Duration::seconds(user_ttl_secs as i64),
            operator_token_ttl: Duration::seconds(operator_ttl_secs as i64),
        }
    }

    pub fn issue_user_token(&self, user_id: &str) -> Result<String, ServiceError> {
        self.issue(user_id, ROLE_USER, self.user_token_ttl)
    }

    pub fn issue_operator_token(&self, username: &str) -> Result<String, ServiceError> {
        self.issue(username, ROLE_ADMIN, self.operator_token_ttl)
    }

    fn issue(&self, subject: &str, role: &str, ttl: Duration) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ServiceError::Token(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                ServiceError::Unauthorized("Token expired".to_string())
            }
            _ => ServiceError::Unauthorized("Invalid token".to_string()),
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn authenticate(parts: &Parts, state: &AppState, role: &str) -> Result<Claims, ServiceError> {
    let token = bearer_token(parts)
        .ok_or_else(|| ServiceError::Unauthorized("Missing bearer token".to_string()))?;

    let claims = state.auth.validate_token(token)?;
    if claims.role != role {
        return Err(ServiceError::Unauthorized(
            "Insufficient privileges".to_string(),
        ));
    }
    Ok(claims)
}

/// Extractor for storefront-user routes; rejects anything but a valid
/// `role = "user"` token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

impl CurrentUser {
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state, ROLE_USER).map(CurrentUser)
    }
}

/// Extractor for dashboard routes; rejects anything but a valid
/// `role = "admin"` token.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub Claims);

impl CurrentAdmin {
    pub fn username(&self) -> &str {
        &self.0.sub
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state, ROLE_ADMIN).map(CurrentAdmin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("test-secret-test-secret-test-secret".into(), 3600, 21600)
    }

    #[test]
    fn user_token_round_trips() {
        let auth = service();
        let token = auth.issue_user_token("u1234567").unwrap();
        let claims = auth.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "u1234567");
        assert_eq!(claims.role, ROLE_USER);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn operator_token_carries_admin_role() {
        let auth = service();
        let token = auth.issue_operator_token("kasir01").unwrap();
        let claims = auth.validate_token(&token).unwrap();
        assert_eq!(claims.role, ROLE_ADMIN);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let auth = service();
        let other = AuthService::new("another-secret-another-secret-xx".into(), 3600, 21600);
        let token = other.issue_user_token("u1").unwrap();
        assert!(auth.validate_token(&token).is_err());
    }
}
