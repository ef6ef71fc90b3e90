/**
 * Project Request and Response Types
 */
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Create project request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CreateProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl CreateProjectRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_title(&self.title)
    }
}

/// Partial project update; absent fields keep their stored value
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateProjectRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

/// Project as returned to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProjectResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub owner_id: i64,
}

fn validate_title(title: &str) -> Result<(), SharedError> {
    if title.trim().is_empty() {
        return Err(SharedError::validation("title", "Title cannot be empty"));
    }
    Ok(())
}
