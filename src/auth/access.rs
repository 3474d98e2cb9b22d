//! Authorization Decisions
//! Mission: Role and ownership gates applied after a token has been validated

use crate::auth::{error::AuthError, models::IdentityContext};
use tracing::debug;

/// What an operation demands of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Any caller holding a valid token
    AnyAuthenticated,
    /// Role must be `admin`
    AdminOnly,
    /// Caller id must equal the resource owner's id. Admins get no override.
    Owner(i64),
}

/// Allow or deny `identity` for `capability`.
///
/// Denial is always [`AuthError::Forbidden`], which renders exactly like
/// an invalid token.
pub fn authorize(identity: &IdentityContext, capability: Capability) -> Result<(), AuthError> {
    let allowed = match capability {
        Capability::AnyAuthenticated => true,
        Capability::AdminOnly => identity.is_admin(),
        Capability::Owner(owner_id) => identity.id == owner_id,
    };

    if allowed {
        Ok(())
    } else {
        debug!(
            user_id = identity.id,
            role = identity.role.as_str(),
            ?capability,
            "Access denied"
        );
        Err(AuthError::Forbidden)
    }
}
