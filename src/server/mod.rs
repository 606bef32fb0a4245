//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework and SeaORM for database operations.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers, access control and envelopes
//! - **Service Layer** (`service/`) - Operations on one resource, run through the pipeline
//! - **Pipeline** (`pipeline/`) - Schema validation, loading, side effects, mutation and
//!   projection shared by every update
//! - **Data Layer** (`data/`) - Repositories converting entities to domain models
//! - **Model Layer** (`model/`) - Domain records and their merge policies
//! - **Collaborators** (`collaborator/`) - Asset storage and mail delivery
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session access and the authorization gate
//!
//! # Request Flow
//!
//! 1. **Router** dispatches the request to a controller
//! 2. **Controller** authorizes the caller and validates the body against a schema
//! 3. **Service** loads the record, resolves side effects and applies the patch
//! 4. **Data** commits the record and its child rows in one transaction
//! 5. **Controller** projects the stored record into the response envelope

pub mod collaborator;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod pipeline;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
