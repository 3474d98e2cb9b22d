//! Service Configuration
//! Mission: Collect runtime settings from CLI flags, env vars and `.env`

use clap::Parser;
use std::path::Path;

pub const DEV_JWT_SECRET: &str = "dev-secret-change-in-production-minimum-32-characters";

/// Runtime configuration for the to-do server.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server", about = "Multi-user to-do list API")]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind_addr: String,

    /// SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = "todosapp.db")]
    pub database_path: String,

    /// HS256 signing secret for access tokens
    #[arg(long, env = "JWT_SECRET", default_value = DEV_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    #[arg(long, env = "TOKEN_TTL_MINUTES", default_value_t = 20)]
    pub token_ttl_minutes: i64,

    /// bcrypt work factor for new password hashes
    #[arg(long, env = "BCRYPT_COST", default_value_t = bcrypt::DEFAULT_COST)]
    pub bcrypt_cost: u32,

    /// Username for the admin account created when none exists
    #[arg(long, env = "BOOTSTRAP_ADMIN_USERNAME", requires = "bootstrap_admin_password")]
    pub bootstrap_admin_username: Option<String>,

    #[arg(long, env = "BOOTSTRAP_ADMIN_PASSWORD", hide_env_values = true)]
    pub bootstrap_admin_password: Option<String>,
}

impl Config {
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token_ttl_minutes)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

/// Load `.env` from the working directory (and parents), then from the crate root.
pub fn load_env() {
    let _ = dotenv::dotenv();

    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}
