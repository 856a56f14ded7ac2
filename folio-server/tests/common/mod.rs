//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use folio_server::db::{create_pool_with_options, migrations};
use folio_server::models::ContactSubmission;
use folio_server::{NotificationSender, NotifyError};
use sqlx::SqlitePool;
use tokio::sync::Notify;

/// Fresh single-connection in-memory database with the schema applied
pub async fn memory_pool() -> SqlitePool {
    let pool = create_pool_with_options("sqlite::memory:", 1)
        .await
        .expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    pool
}

/// Sender with a fixed outcome that counts invocations
#[derive(Default)]
pub struct StaticSender {
    pub fail: bool,
    calls: AtomicUsize,
}

impl StaticSender {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSender for StaticSender {
    async fn send(&self, _submission: &ContactSubmission) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(NotifyError::MissingConfig { key: "SMTP_SERVER" })
        } else {
            Ok(())
        }
    }
}

/// Sender that panics mid-send
pub struct PanickingSender;

#[async_trait]
impl NotificationSender for PanickingSender {
    async fn send(&self, _submission: &ContactSubmission) -> Result<(), NotifyError> {
        panic!("relay exploded");
    }
}

/// Sender that never finishes in test time
pub struct StallingSender;

#[async_trait]
impl NotificationSender for StallingSender {
    async fn send(&self, _submission: &ContactSubmission) -> Result<(), NotifyError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }
}

/// Sender that announces it has started, then waits to be released
#[derive(Default)]
pub struct GatedSender {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[async_trait]
impl NotificationSender for GatedSender {
    async fn send(&self, _submission: &ContactSubmission) -> Result<(), NotifyError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

/// What [`StoreBreakingSender`] does to the store mid-send
pub enum Breakage {
    ClosePool,
    DropTable,
}

/// Sender that succeeds but breaks the recorder's store while sending
pub struct StoreBreakingSender {
    pool: SqlitePool,
    breakage: Breakage,
    calls: AtomicUsize,
}

impl StoreBreakingSender {
    pub fn new(pool: SqlitePool, breakage: Breakage) -> Self {
        Self {
            pool,
            breakage,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSender for StoreBreakingSender {
    async fn send(&self, _submission: &ContactSubmission) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.breakage {
            Breakage::ClosePool => self.pool.close().await,
            Breakage::DropTable => {
                sqlx::query("DROP TABLE contact_messages")
                    .execute(&self.pool)
                    .await
                    .expect("drop table failed");
            }
        }
        Ok(())
    }
}
