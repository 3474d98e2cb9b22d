//! Authentication Models
//! Mission: Define user, token and identity data structures

use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub is_active: bool,
    pub role: UserRole,
    pub phone_number: Option<String>,
}

impl User {
    /// Identity carried by tokens issued for this user.
    pub fn identity(&self) -> IdentityContext {
        IdentityContext {
            username: self.username.clone(),
            id: self.id,
            role: self.role,
        }
    }
}

/// User roles for RBAC
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    #[serde(rename = "user")]
    #[default]
    User, // Own to-dos and own profile
    #[serde(rename = "admin")]
    Admin, // Additionally: every user's to-dos and accounts
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(UserRole::User),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// JWT Claims payload
///
/// `sub`, `id` and `role` are optional on the way in so a validly signed
/// token that lacks one of them is reported as a missing claim rather than
/// a parse failure. Unknown fields are ignored. Issued tokens always carry
/// `exp`; a token without one never expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>, // subject (username)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>, // expiration timestamp
}

/// Decoded caller identity attached to every authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    pub username: String,
    pub id: i64,
    pub role: UserRole,
}

impl IdentityContext {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
    pub phone_number: Option<String>,
}

/// User response (sanitized)
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub role: UserRole,
    pub phone_number: Option<String>,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_active: user.is_active,
            role: user.role,
            phone_number: user.phone_number.clone(),
        }
    }
}

/// Password change request body
#[derive(Debug, Deserialize)]
pub struct PasswordChangeRequest {
    pub password: String,
    pub new_password: String,
}
