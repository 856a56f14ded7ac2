//! Route handlers organized by resource

pub mod health;
pub mod portfolio;
pub mod blog;
pub mod contact;
