//! JWT Token Handler
//! Mission: Issue and validate HS256 access tokens

use crate::auth::{
    error::AuthError,
    models::{Claims, IdentityContext, UserRole},
};
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT Handler for token operations
pub struct JwtHandler {
    secret: String,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Issue a token for `identity` that expires `ttl` from now
    pub fn issue_token(&self, identity: &IdentityContext, ttl: chrono::Duration) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(ttl)
            .context("Invalid timestamp")?
            .timestamp()
            .max(0) as usize;

        let claims = Claims {
            sub: Some(identity.username.clone()),
            id: Some(identity.id),
            role: Some(identity.role.as_str().to_string()),
            exp: Some(expiration),
        };

        debug!(
            "Issuing JWT for user {} ({}), expires in {}s",
            identity.username,
            identity.id,
            ttl.num_seconds()
        );

        encode(
            &Header::new(ALGORITHM),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")
    }

    /// Validate a token and resolve the caller's identity
    pub fn validate_token(&self, token: &str) -> Result<IdentityContext, AuthError> {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        // `exp` is checked when present but not demanded
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            debug!("Rejected token: {}", e);
            AuthError::InvalidToken
        })?
        .claims;

        let (Some(username), Some(id), Some(role)) = (claims.sub, claims.id, claims.role) else {
            debug!("Rejected token: missing sub, id or role claim");
            return Err(AuthError::InvalidToken);
        };
        let role = UserRole::from_str(&role).ok_or(AuthError::InvalidToken)?;

        debug!("Validated JWT for user {}", username);

        Ok(IdentityContext { username, id, role })
    }
}
