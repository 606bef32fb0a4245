//! HTTP handlers.
//!
//! Handlers check capabilities through `AuthGuard`, validate request bodies against the
//! matching schema, call a service and wrap the result in an `Envelope`.

pub mod article;
pub mod auth;
pub mod category;
pub mod comment;
pub mod message;
pub mod project;
pub mod user;
