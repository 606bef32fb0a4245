//! Factory methods for creating test data.
//!
//! Each entity has its own module with a `Factory` builder for customization and a
//! `create_*` convenience function for quick default creation. Factories insert
//! directly through SeaORM active models, bypassing validation, so tests can set up
//! states the API would never produce.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let category = factory::category::create_category(&db).await?;
//! let article = factory::article::ArticleFactory::new(&db)
//!     .author(user.id)
//!     .featured(true)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - users and their session tokens
//! - `message` - contact messages and reply threads
//! - `category` - categories
//! - `article` - articles and their category links
//! - `comment` - comments and votes
//! - `project` - projects and their category links

pub mod article;
pub mod category;
pub mod comment;
pub mod helpers;
pub mod message;
pub mod project;
pub mod user;

pub use article::create_article;
pub use category::create_category;
pub use comment::create_comment;
pub use message::create_message;
pub use project::create_project;
pub use user::create_user;
