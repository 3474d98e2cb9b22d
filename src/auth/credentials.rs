//! Credential Verification
//! Mission: Check passwords against stored bcrypt hashes without leaking which part failed

use crate::auth::models::User;
use anyhow::{Context, Result};
use tracing::debug;

/// bcrypt hash at the default cost, checked against when the username is
/// unknown so both failure paths pay for one hash verification.
const DUMMY_HASH: &str = "$2b$12$as7pMGi/eOfnd.jBiCV1JO4fnZsqMlAGKpCsQbykPnXqeCwFXB8Cy";

/// The slice of the user table the auth core relies on.
pub trait CredentialStore {
    fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;
    fn read_password_hash(&self, user: &User) -> Result<String>;
    fn write_password_hash(&self, user: &User, hash: &str) -> Result<()>;
}

/// Verify a username/password pair.
///
/// Returns `Ok(None)` both for an unknown username and for a wrong
/// password. `Err` is reserved for storage or hash-format failures.
pub fn verify_credentials<S>(store: &S, username: &str, password: &str) -> Result<Option<User>>
where
    S: CredentialStore + ?Sized,
{
    let Some(user) = store.find_user_by_username(username)? else {
        let _ = bcrypt::verify(password, DUMMY_HASH);
        return Ok(None);
    };

    let hash = store.read_password_hash(&user)?;
    if bcrypt::verify(password, &hash).context("Failed to verify password")? {
        Ok(Some(user))
    } else {
        debug!(user_id = user.id, "Password mismatch");
        Ok(None)
    }
}

/// Replace `user`'s password after re-checking the current one.
///
/// Returns `Ok(false)` and leaves the stored hash untouched when
/// `current_password` does not match.
pub fn change_password<S>(
    store: &S,
    user: &User,
    current_password: &str,
    new_password: &str,
    cost: u32,
) -> Result<bool>
where
    S: CredentialStore + ?Sized,
{
    let hash = store.read_password_hash(user)?;
    if !bcrypt::verify(current_password, &hash).context("Failed to verify password")? {
        return Ok(false);
    }

    let new_hash = bcrypt::hash(new_password, cost).context("Failed to hash password")?;
    store.write_password_hash(user, &new_hash)?;
    Ok(true)
}
