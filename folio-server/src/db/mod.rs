//! Database layer - connection pool, schema, and repositories
//!
//! # Design Principles
//!
//! - The pool is created by the entry point and passed in, never global
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Rely on DB constraints for column limits
//! - Contact messages are written in exactly one transaction

pub mod pool;
pub mod migrations;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
