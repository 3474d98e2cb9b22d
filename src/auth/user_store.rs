//! User Storage
//! Mission: Store and manage user accounts in SQLite

use crate::auth::{
    credentials::CredentialStore,
    models::{CreateUserRequest, User, UserRole},
};
use crate::db::Database;
use anyhow::{Context, Result};
use bcrypt::hash;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{info, warn};

const USER_COLUMNS: &str =
    "id, email, username, first_name, last_name, hashed_password, is_active, role, phone_number";

/// User storage with SQLite backend
pub struct UserStore {
    db: Database,
    hash_cost: u32,
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let role_str: String = row.get(7)?;
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        password_hash: row.get(5)?,
        is_active: row.get(6)?,
        role: UserRole::from_str(&role_str).unwrap_or(UserRole::User),
        phone_number: row.get(8)?,
    })
}

impl UserStore {
    pub fn new(db: Database, hash_cost: u32) -> Self {
        Self { db, hash_cost }
    }

    pub fn hash_cost(&self) -> u32 {
        self.hash_cost
    }

    /// Create an admin account unless one already exists
    pub fn ensure_admin(&self, username: &str, password: &str) -> Result<()> {
        let count: i64 = self
            .db
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM users WHERE role = 'admin'",
                [],
                |row| row.get(0),
            )
            .context("Failed to check for admin users")?;

        if count > 0 {
            return Ok(());
        }

        self.create_user(&CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@localhost"),
            first_name: String::new(),
            last_name: String::new(),
            password: password.to_string(),
            role: UserRole::Admin,
            phone_number: None,
        })?;

        warn!(username, "Bootstrap admin account created; change its password");
        Ok(())
    }

    /// Get user by username
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.db.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"))?;

        stmt.query_row(params![username], row_to_user)
            .optional()
            .context("Failed to look up user by username")
    }

    /// Get user by ID
    pub fn get_user_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;

        stmt.query_row(params![user_id], row_to_user)
            .optional()
            .context("Failed to look up user by id")
    }

    /// Create a new user
    pub fn create_user(&self, req: &CreateUserRequest) -> Result<User> {
        let password_hash = hash(&req.password, self.hash_cost).context("Failed to hash password")?;

        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO users (email, username, first_name, last_name, hashed_password, is_active, role, phone_number)
             VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7)",
            params![
                req.email,
                req.username,
                req.first_name,
                req.last_name,
                password_hash,
                req.role.as_str(),
                req.phone_number,
            ],
        )
        .context("Failed to insert user")?;

        let user = User {
            id: conn.last_insert_rowid(),
            email: req.email.clone(),
            username: req.username.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            password_hash,
            is_active: true,
            role: req.role,
            phone_number: req.phone_number.clone(),
        };

        info!(
            "Created user: {} ({}, id {})",
            user.username,
            user.role.as_str(),
            user.id
        );

        Ok(user)
    }

    /// List all users (admin only)
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;

        let users = stmt
            .query_map([], row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Delete a user and their to-dos (admin only). Returns false if no such user.
    pub fn delete_user(&self, user_id: i64) -> Result<bool> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        let todos_removed = tx.execute("DELETE FROM todos WHERE owner_id = ?1", params![user_id])?;
        let rows_affected = tx.execute("DELETE FROM users WHERE id = ?1", params![user_id])?;
        if rows_affected == 0 {
            // Dropping the transaction rolls it back
            return Ok(false);
        }
        tx.commit().context("Failed to commit user deletion")?;

        info!(user_id, todos_removed, "Deleted user");
        Ok(true)
    }

    /// Set a user's phone number. Returns false if no such user.
    pub fn update_phone_number(&self, user_id: i64, phone_number: &str) -> Result<bool> {
        let rows_affected = self
            .db
            .conn()
            .execute(
                "UPDATE users SET phone_number = ?1 WHERE id = ?2",
                params![phone_number, user_id],
            )
            .context("Failed to update phone number")?;

        Ok(rows_affected > 0)
    }
}

impl CredentialStore for UserStore {
    fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username(username)
    }

    fn read_password_hash(&self, user: &User) -> Result<String> {
        self.db
            .conn()
            .query_row(
                "SELECT hashed_password FROM users WHERE id = ?1",
                params![user.id],
                |row| row.get(0),
            )
            .context("Failed to read password hash")
    }

    fn write_password_hash(&self, user: &User, hash: &str) -> Result<()> {
        let rows_affected = self
            .db
            .conn()
            .execute(
                "UPDATE users SET hashed_password = ?1 WHERE id = ?2",
                params![hash, user.id],
            )
            .context("Failed to write password hash")?;

        if rows_affected == 0 {
            anyhow::bail!("User not found");
        }
        info!(user_id = user.id, "Password hash updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::{change_password, verify_credentials};
    use crate::db::is_unique_violation;
    use tempfile::NamedTempFile;

    const TEST_COST: u32 = 4;

    fn create_test_store() -> (UserStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db = Database::open(temp_file.path().to_str().unwrap()).unwrap();
        (UserStore::new(db, TEST_COST), temp_file)
    }

    fn request(username: &str, role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password: "testpassword".to_string(),
            role,
            phone_number: Some("(99) 99999-9999".to_string()),
        }
    }

    #[test]
    fn test_create_and_retrieve_user() {
        let (store, _temp) = create_test_store();

        let created = store.create_user(&request("test_user", UserRole::User)).unwrap();
        assert!(created.id > 0);
        assert_ne!(created.password_hash, "testpassword");

        let by_name = store.get_user_by_username("test_user").unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
        assert_eq!(by_name.email, "test_user@example.com");
        assert_eq!(by_name.role, UserRole::User);
        assert!(by_name.is_active);

        let by_id = store.get_user_by_id(created.id).unwrap().unwrap();
        assert_eq!(by_id.username, "test_user");

        assert!(store.get_user_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_is_unique_violation() {
        let (store, _temp) = create_test_store();
        store.create_user(&request("dup", UserRole::User)).unwrap();

        let err = store.create_user(&request("dup", UserRole::User)).unwrap_err();
        let sqlite_err = err.downcast_ref::<rusqlite::Error>().unwrap();
        assert!(is_unique_violation(sqlite_err));
    }

    #[test]
    fn test_password_verification() {
        let (store, _temp) = create_test_store();
        store.create_user(&request("test_user", UserRole::User)).unwrap();

        assert!(verify_credentials(&store, "test_user", "testpassword")
            .unwrap()
            .is_some());
        assert!(verify_credentials(&store, "test_user", "wrongpassword")
            .unwrap()
            .is_none());
        assert!(verify_credentials(&store, "nonexistent", "testpassword")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_change_password_persists() {
        let (store, _temp) = create_test_store();
        let user = store.create_user(&request("test_user", UserRole::User)).unwrap();

        assert!(change_password(&store, &user, "testpassword", "newpassword", TEST_COST).unwrap());
        assert!(verify_credentials(&store, "test_user", "newpassword")
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_ensure_admin_only_once() {
        let (store, _temp) = create_test_store();

        store.ensure_admin("root", "rootpassword").unwrap();
        store.ensure_admin("other", "otherpassword").unwrap();

        let users = store.list_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "root");
        assert_eq!(users[0].role, UserRole::Admin);
    }

    #[test]
    fn test_list_and_delete_user() {
        let (store, _temp) = create_test_store();
        store.create_user(&request("admin", UserRole::Admin)).unwrap();
        let user = store.create_user(&request("tempuser", UserRole::User)).unwrap();
        assert_eq!(store.list_users().unwrap().len(), 2);

        assert!(store.delete_user(user.id).unwrap());
        assert!(store.get_user_by_username("tempuser").unwrap().is_none());
        assert!(!store.delete_user(user.id).unwrap());
        assert_eq!(store.list_users().unwrap().len(), 1);
    }

    #[test]
    fn test_update_phone_number() {
        let (store, _temp) = create_test_store();
        let user = store.create_user(&request("test_user", UserRole::User)).unwrap();

        assert!(store.update_phone_number(user.id, "(99) 11111-9999").unwrap());
        let user = store.get_user_by_id(user.id).unwrap().unwrap();
        assert_eq!(user.phone_number.as_deref(), Some("(99) 11111-9999"));

        assert!(!store.update_phone_number(999, "000").unwrap());
    }
}
