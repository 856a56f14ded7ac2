//! folio-server: HTTP backend for a personal website
//!
//! Serves portfolio items and blog posts, and records contact messages
//! with a best-effort email notification to the site owner.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod notify;
pub mod recorder;

pub use config::{ConfigSource, EnvConfig, MapConfig};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use notify::{NotificationSender, NotifyError, SmtpNotifier};
pub use recorder::{ContactRecorder, RecordError, SubjectPolicy};
