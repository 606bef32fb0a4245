//! SeaORM entities for the folio content backend.
//!
//! One module per table. Aggregate roots (`user`, `message`, `category`, `article`,
//! `comment`, `project`) own their child tables through cascading foreign keys.

pub mod prelude;

pub mod article;
pub mod article_category;
pub mod category;
pub mod comment;
pub mod comment_vote;
pub mod message;
pub mod message_reply;
pub mod project;
pub mod project_category;
pub mod user;
pub mod user_token;
