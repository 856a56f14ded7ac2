//! HTTP server command
//!
//! Builds the store pool, applies the schema, wires the SMTP notifier into
//! the contact recorder, and runs the server until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use folio_server::db::{create_pool, migrations};
use folio_server::http::{run_server, AppState, ServerConfig};
use folio_server::{ContactRecorder, EnvConfig, SmtpNotifier, SubjectPolicy};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://folio.db?mode=rwc")]
    pub database_url: String,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Frontend origin allowed by CORS (repeatable)
    #[arg(long = "allow-origin", default_values_t = ServerConfig::default().allowed_origins)]
    pub allowed_origins: Vec<String>,

    /// Store the optional subject of contact messages instead of discarding it
    #[arg(long, env = "CONTACT_KEEP_SUBJECT")]
    pub keep_subject: bool,

    /// SMTP socket timeout in seconds
    #[arg(long, env = "SMTP_TIMEOUT_SECS", default_value_t = 10)]
    pub smtp_timeout_secs: u64,

    /// Skip inserting sample portfolio/blog content into empty tables
    #[arg(long)]
    pub no_seed: bool,
}

/// Outer deadline for one notification: room for connect and send on top of
/// the socket timeout. Saturates for very large timeouts.
fn send_deadline(smtp_timeout: Duration) -> Duration {
    smtp_timeout.saturating_mul(3)
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting folio server on {}", args.bind);

    let pool = create_pool(&args.database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to apply database schema")?;
    if !args.no_seed {
        migrations::seed(&pool)
            .await
            .context("Failed to seed sample content")?;
    }

    let smtp_timeout = Duration::from_secs(args.smtp_timeout_secs);
    let notifier = SmtpNotifier::new(Arc::new(EnvConfig)).with_timeout(smtp_timeout);

    let subject_policy = if args.keep_subject {
        SubjectPolicy::Keep
    } else {
        SubjectPolicy::Discard
    };
    let recorder = ContactRecorder::new(pool.clone(), Arc::new(notifier))
        .with_subject_policy(subject_policy)
        .with_send_deadline(send_deadline(smtp_timeout));

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        allowed_origins: args.allowed_origins,
    };

    run_server(AppState::new(pool.clone(), recorder), config)
        .await
        .context("Server error")?;

    pool.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_deadline_triples_socket_timeout() {
        assert_eq!(send_deadline(Duration::from_secs(10)), Duration::from_secs(30));
    }

    #[test]
    fn send_deadline_saturates_on_huge_timeout() {
        assert_eq!(send_deadline(Duration::from_secs(u64::MAX)), Duration::MAX);
    }

    #[test]
    fn huge_timeout_parses() {
        let args = ServeArgs::try_parse_from([
            "serve",
            "--smtp-timeout-secs",
            "18446744073709551615",
        ])
        .unwrap();
        assert_eq!(args.smtp_timeout_secs, u64::MAX);
    }
}
