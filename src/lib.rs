//! Todo Backend Library
//!
//! Exposes the service modules for the server binary and for tests.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod extract;
pub mod middleware;
pub mod todos;

pub use app::{build_router, AppState};
pub use config::Config;
