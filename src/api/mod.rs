//! HTTP API handlers for to-dos, admin and user profiles.

pub mod admin;
pub mod todos;
pub mod users;
