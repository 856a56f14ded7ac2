//! Contact message repository
//!
//! Inserts happen inside the recorder's transaction; this module never
//! commits on its own.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::ContactMessage;

/// A finalized contact message waiting for its id.
///
/// `email_sent` and `created_at` are not optional here: a row cannot be
/// written without a delivery outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub email_sent: bool,
}

/// Contact message repository
pub struct ContactRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a finalized message on an open connection or transaction.
    ///
    /// The store assigns `id`; the returned row is read back via RETURNING.
    pub async fn insert(
        conn: &mut SqliteConnection,
        new: &NewContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, subject, message, created_at, email_sent)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, name, email, subject, message, created_at, email_sent
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(new.subject.as_deref())
        .bind(&new.message)
        .bind(new.created_at)
        .bind(new.email_sent)
        .fetch_one(conn)
        .await
    }

    /// Messages sent from an address, oldest first.
    pub async fn list_by_email(&self, email: &str) -> Result<Vec<ContactMessage>, sqlx::Error> {
        sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, subject, message, created_at, email_sent
            FROM contact_messages
            WHERE email = ?
            ORDER BY id ASC
            "#,
        )
        .bind(email)
        .fetch_all(self.pool)
        .await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool_with_options, migrations};

    fn sample(email_sent: bool) -> NewContactMessage {
        NewContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: None,
            message: "Hello".into(),
            created_at: Utc::now(),
            email_sent,
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_keeps_outcome() {
        let pool = create_pool_with_options("sqlite::memory:", 1).await.unwrap();
        migrations::run(&pool).await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let first = ContactRepo::insert(&mut conn, &sample(true)).await.unwrap();
        let second = ContactRepo::insert(&mut conn, &sample(false)).await.unwrap();
        drop(conn);

        assert_ne!(first.id, second.id);
        assert!(first.email_sent);
        assert!(!second.email_sent);

        let rows = ContactRepo::new(&pool)
            .list_by_email("ada@example.com")
            .await
            .unwrap();
        assert_eq!(rows, vec![first, second]);
    }

    #[tokio::test]
    async fn insert_inside_rolled_back_transaction_leaves_nothing() {
        let pool = create_pool_with_options("sqlite::memory:", 1).await.unwrap();
        migrations::run(&pool).await.unwrap();

        let mut tx = pool.begin().await.unwrap();
        ContactRepo::insert(&mut tx, &sample(true)).await.unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(ContactRepo::new(&pool).count().await.unwrap(), 0);
    }
}
