//! Portfolio repository

use sqlx::SqlitePool;

use super::DbError;
use crate::models::{NewPortfolioItem, PortfolioItem};

/// Portfolio repository
pub struct PortfolioRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PortfolioRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<PortfolioItem>, DbError> {
        let items = sqlx::query_as::<_, PortfolioItem>(
            "SELECT id, title, description, image_url, project_url FROM portfolio_items ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(items)
    }

    pub async fn create(&self, item: NewPortfolioItem) -> Result<PortfolioItem, DbError> {
        let created = sqlx::query_as::<_, PortfolioItem>(
            r#"
            INSERT INTO portfolio_items (title, description, image_url, project_url)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, description, image_url, project_url
            "#,
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.image_url)
        .bind(&item.project_url)
        .fetch_one(self.pool)
        .await?;
        Ok(created)
    }

    /// Delete by id; `NotFound` if no row matched.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM portfolio_items WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "Portfolio item",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
