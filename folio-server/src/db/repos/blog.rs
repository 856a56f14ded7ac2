//! Blog post repository

use chrono::Utc;
use sqlx::SqlitePool;

use super::DbError;
use crate::models::{BlogPost, NewBlogPost};

/// Blog post repository
pub struct BlogRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BlogRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<BlogPost>, DbError> {
        let posts = sqlx::query_as::<_, BlogPost>(
            "SELECT id, title, content, author, created_at FROM blog_posts ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(posts)
    }

    pub async fn get(&self, id: i64) -> Result<BlogPost, DbError> {
        sqlx::query_as::<_, BlogPost>(
            "SELECT id, title, content, author, created_at FROM blog_posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "Blog post",
            id: id.to_string(),
        })
    }

    /// Insert a post stamped with the current time.
    pub async fn create(&self, post: NewBlogPost) -> Result<BlogPost, DbError> {
        let created = sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (title, content, author, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, content, author, created_at
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.author)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;
        Ok(created)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "Blog post",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
