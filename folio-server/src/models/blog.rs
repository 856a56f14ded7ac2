//! Blog post models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{required, ValidationError};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_AUTHOR_LEN: usize = 100;

/// Stored blog post
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// POST /blog/blog-posts request body
#[derive(Debug, Clone, Deserialize)]
pub struct BlogPostForm {
    pub title: String,
    pub content: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl BlogPostForm {
    pub fn validate(self) -> Result<NewBlogPost, ValidationError> {
        Ok(NewBlogPost {
            title: required("title", self.title, MAX_TITLE_LEN)?,
            content: self.content,
            author: required("author", self.author, MAX_AUTHOR_LEN)?,
        })
    }
}
