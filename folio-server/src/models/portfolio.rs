//! Portfolio item models

use serde::{Deserialize, Serialize};

use super::validation::{bounded, required, ValidationError};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_IMAGE_URL_LEN: usize = 400;
pub const MAX_PROJECT_URL_LEN: usize = 200;

/// Stored portfolio item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PortfolioItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub project_url: String,
}

/// POST /portfolio request body
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioItemForm {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub project_url: String,
}

/// Validated portfolio item, ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPortfolioItem {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub project_url: String,
}

impl PortfolioItemForm {
    pub fn validate(self) -> Result<NewPortfolioItem, ValidationError> {
        Ok(NewPortfolioItem {
            title: required("title", self.title, MAX_TITLE_LEN)?,
            description: self.description,
            image_url: bounded("image_url", self.image_url, MAX_IMAGE_URL_LEN)?,
            project_url: bounded("project_url", self.project_url, MAX_PROJECT_URL_LEN)?,
        })
    }
}
