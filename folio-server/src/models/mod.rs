//! Domain models with validation at the boundary
//!
//! Request bodies deserialize into `*Form` types and are validated into
//! owned values before reaching the database layer.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod contact;
pub mod portfolio;
pub mod blog;

pub use validation::ValidationError;
pub use contact::{ContactForm, ContactMessage, ContactSubmission};
pub use portfolio::{NewPortfolioItem, PortfolioItem, PortfolioItemForm};
pub use blog::{BlogPost, BlogPostForm, NewBlogPost};
