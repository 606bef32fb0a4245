//! Domain models.
//!
//! Each aggregate is converted from its entity rows at the repository boundary and
//! implements `Record`, declaring the merge policy of every patchable field and the
//! fields the projector must strip. Creation parameters and list filters live beside
//! the record they belong to.

pub mod article;
pub mod category;
pub mod comment;
pub mod image;
pub mod message;
pub mod page;
pub mod project;
pub mod user;
