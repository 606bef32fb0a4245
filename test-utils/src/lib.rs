//! Test harness for the folio backend.
//!
//! `builder::TestBuilder` creates an in-memory SQLite database holding only the tables a
//! test asks for, `context::TestContext` owns that connection plus an optional cookie
//! session, and `factory` inserts rows with defaults so tests only spell out the fields
//! they care about.
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn lists_articles() -> Result<(), DbErr> {
//!     let test = TestBuilder::new().with_content_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let article = factory::create_article(db).await?;
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
