//! Schema bootstrap and first-run sample data

use chrono::Utc;
use sqlx::SqlitePool;

use super::repos::DbError;

/// Create all tables. Safe to run on every startup.
pub async fn run(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS portfolio_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL CHECK (length(title) <= 100),
            description TEXT NOT NULL,
            image_url TEXT NOT NULL CHECK (length(image_url) <= 400),
            project_url TEXT NOT NULL CHECK (length(project_url) <= 200)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS blog_posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL CHECK (length(title) <= 200),
            content TEXT NOT NULL,
            author TEXT NOT NULL CHECK (length(author) <= 100),
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // email_sent has no default: every insert must bind it
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contact_messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(name) <= 100),
            email TEXT NOT NULL CHECK (length(email) <= 100),
            subject TEXT CHECK (subject IS NULL OR length(subject) <= 200),
            message TEXT NOT NULL,
            created_at TEXT NOT NULL,
            email_sent BOOLEAN NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_contact_messages_email ON contact_messages(email)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Migrations complete");
    Ok(())
}

/// Insert sample content into empty tables.
///
/// Each table is checked independently, so a site with posts but no
/// portfolio still gets the sample portfolio item.
pub async fn seed(pool: &SqlitePool) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    let (portfolio_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM portfolio_items")
        .fetch_one(&mut *tx)
        .await?;
    if portfolio_count == 0 {
        sqlx::query(
            r#"
            INSERT INTO portfolio_items (title, description, image_url, project_url)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind("Personal Website")
        .bind("A personal website showcasing my portfolio and blog.")
        .bind("https://via.placeholder.com/150")
        .bind("https://mywebsite.com")
        .execute(&mut *tx)
        .await?;
        tracing::info!("Seeded sample portfolio item");
    }

    let (blog_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blog_posts")
        .fetch_one(&mut *tx)
        .await?;
    if blog_count == 0 {
        sqlx::query(
            r#"
            INSERT INTO blog_posts (title, content, author, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind("How I Built My Website")
        .bind("Lorem ipsum dolor sit amet...")
        .bind("Site Owner")
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        tracing::info!("Seeded sample blog post");
    }

    tx.commit().await?;
    Ok(())
}
