//! To-do Models

use crate::errors::ApiError;
use serde::{Deserialize, Serialize};

/// A stored to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: i64,
    pub complete: bool,
    pub owner_id: i64,
}

/// Create/update request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoRequest {
    pub title: String,
    pub description: String,
    pub priority: i64,
    pub complete: bool,
}

impl TodoRequest {
    /// Field rules: title >= 3 chars, description 3..=100 chars, priority 1..=5
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.chars().count() < 3 {
            return Err(ApiError::Validation(
                "title must be at least 3 characters".to_string(),
            ));
        }

        let description_len = self.description.chars().count();
        if !(3..=100).contains(&description_len) {
            return Err(ApiError::Validation(
                "description must be between 3 and 100 characters".to_string(),
            ));
        }

        if !(1..=5).contains(&self.priority) {
            return Err(ApiError::Validation(
                "priority must be between 1 and 5".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TodoRequest {
        TodoRequest {
            title: "New Todo".to_string(),
            description: "New todo description".to_string(),
            priority: 5,
            complete: false,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_field_rules() {
        let short_title = TodoRequest {
            title: "ab".to_string(),
            ..request()
        };
        assert!(short_title.validate().is_err());

        let long_description = TodoRequest {
            description: "x".repeat(101),
            ..request()
        };
        assert!(long_description.validate().is_err());

        let edge_description = TodoRequest {
            description: "x".repeat(100),
            ..request()
        };
        assert!(edge_description.validate().is_ok());

        for priority in [0, 6, -1] {
            let bad = TodoRequest {
                priority,
                ..request()
            };
            assert!(bad.validate().is_err(), "priority {priority} accepted");
        }
    }

    #[test]
    fn test_todo_json_shape() {
        let todo = Todo {
            id: 1,
            title: "Test Todo".to_string(),
            description: "Test Description".to_string(),
            priority: 3,
            complete: false,
            owner_id: 1,
        };
        assert_eq!(
            serde_json::to_value(&todo).unwrap(),
            serde_json::json!({
                "id": 1,
                "title": "Test Todo",
                "description": "Test Description",
                "priority": 3,
                "complete": false,
                "owner_id": 1
            })
        );
    }
}
