//! Business logic layer.
//!
//! Services receive validated input (`Normalized`) from controllers, the database
//! connection and the collaborators. Every update goes through the `UpdatePipeline`, so
//! side effects complete before the aggregate is committed.

pub mod article;
pub mod auth;
pub mod category;
pub mod comment;
pub mod message;
pub mod project;
pub mod user;

#[cfg(test)]
mod test;
