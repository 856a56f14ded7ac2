//! Contact message recorder
//!
//! Per submission:
//!
//! ```text
//! Received -> Staged -> NotificationAttempted -> Finalized (committed)
//!                  \________________________-> RolledBack
//! ```
//!
//! The notification outcome never decides whether the row is written; only
//! store failures do. Nothing is visible to other connections before commit,
//! and no pooled connection is held while the notification is in flight.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::db::repos::{ContactRepo, NewContactMessage};
use crate::models::{ContactMessage, ContactSubmission};
use crate::notify::{NotificationSender, NotifyError};

/// Upper bound on one notification attempt, on top of the transport's own
/// socket timeout.
pub const DEFAULT_SEND_DEADLINE: Duration = Duration::from_secs(30);

/// What happens to the optional `subject` field of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubjectPolicy {
    /// Store NULL regardless of input
    #[default]
    Discard,
    /// Store the submitted subject
    Keep,
}

/// Why a submission was not persisted
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("failed to open transaction: {0}")]
    Begin(#[source] sqlx::Error),

    #[error("failed to insert contact message: {0}")]
    Insert(#[source] sqlx::Error),

    #[error("failed to commit contact message: {0}")]
    Commit(#[source] sqlx::Error),
}

/// Submission held in memory until its delivery outcome is known
#[derive(Debug)]
struct StagedContact {
    submission: ContactSubmission,
}

impl StagedContact {
    fn finalize(
        self,
        email_sent: bool,
        policy: SubjectPolicy,
        now: DateTime<Utc>,
    ) -> NewContactMessage {
        let ContactSubmission {
            name,
            email,
            subject,
            message,
        } = self.submission;

        let subject = match policy {
            SubjectPolicy::Discard => {
                if subject.is_some() {
                    tracing::debug!("Discarding submitted subject");
                }
                None
            }
            SubjectPolicy::Keep => subject,
        };

        NewContactMessage {
            name,
            email,
            subject,
            message,
            created_at: now,
            email_sent,
        }
    }
}

/// Persists contact submissions and records whether the owner was notified
#[derive(Clone)]
pub struct ContactRecorder {
    pool: SqlitePool,
    notifier: Arc<dyn NotificationSender>,
    subject_policy: SubjectPolicy,
    send_deadline: Duration,
}

impl ContactRecorder {
    pub fn new(pool: SqlitePool, notifier: Arc<dyn NotificationSender>) -> Self {
        Self {
            pool,
            notifier,
            subject_policy: SubjectPolicy::default(),
            send_deadline: DEFAULT_SEND_DEADLINE,
        }
    }

    pub fn with_subject_policy(mut self, policy: SubjectPolicy) -> Self {
        self.subject_policy = policy;
        self
    }

    pub fn with_send_deadline(mut self, deadline: Duration) -> Self {
        self.send_deadline = deadline;
        self
    }

    pub fn subject_policy(&self) -> SubjectPolicy {
        self.subject_policy
    }

    /// Record one submission.
    ///
    /// The notifier is invoked exactly once, before any store connection is
    /// taken from the pool. Its outcome becomes `email_sent`. The row is then
    /// written in a single transaction; store failures roll back and are
    /// returned, so no partial row is committed.
    pub async fn record(&self, submission: ContactSubmission) -> Result<ContactMessage, RecordError> {
        let staged = StagedContact { submission };
        let email_sent = self.notify(&staged.submission).await.is_ok();
        let new = staged.finalize(email_sent, self.subject_policy, Utc::now());

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!(error = %e, "Could not open transaction for contact message");
            RecordError::Begin(e)
        })?;

        let message = match ContactRepo::insert(&mut tx, &new).await {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "Error occurred while adding contact message");
                rollback(tx).await;
                return Err(RecordError::Insert(e));
            }
        };

        // A failed commit drops the transaction, which rolls it back
        tx.commit().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to commit contact message");
            RecordError::Commit(e)
        })?;

        tracing::info!(id = message.id, email_sent, "Contact message recorded");
        Ok(message)
    }

    /// Run the notifier under the deadline, containing panics.
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        let attempt = AssertUnwindSafe(self.notifier.send(submission)).catch_unwind();

        let result = match tokio::time::timeout(self.send_deadline, attempt).await {
            Ok(Ok(result)) => result,
            Ok(Err(_panic)) => Err(NotifyError::Panicked),
            Err(_) => Err(NotifyError::TimedOut(self.send_deadline)),
        };

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Contact notification not delivered");
        }
        result
    }
}

async fn rollback(tx: Transaction<'_, Sqlite>) {
    if let Err(e) = tx.rollback().await {
        tracing::error!(error = %e, "Rollback failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(subject: Option<&str>) -> StagedContact {
        let mut submission = ContactSubmission::new("Ada", "ada@example.com", "Hello");
        submission.subject = subject.map(str::to_owned);
        StagedContact { submission }
    }

    #[test]
    fn finalize_discards_subject_by_default() {
        let now = Utc::now();
        let new = staged(Some("Hi")).finalize(true, SubjectPolicy::default(), now);
        assert_eq!(new.subject, None);
        assert!(new.email_sent);
        assert_eq!(new.created_at, now);
    }

    #[test]
    fn finalize_keeps_subject_when_asked() {
        let new = staged(Some("Hi")).finalize(false, SubjectPolicy::Keep, Utc::now());
        assert_eq!(new.subject.as_deref(), Some("Hi"));
        assert!(!new.email_sent);
    }
}
