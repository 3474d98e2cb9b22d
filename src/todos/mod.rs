//! To-do Items
//! Mission: Per-user task records and their SQLite storage

pub mod models;
pub mod store;

pub use models::{Todo, TodoRequest};
pub use store::TodoStore;
