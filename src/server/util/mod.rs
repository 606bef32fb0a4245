//! Request, response and credential helpers shared by controllers and services.

pub mod envelope;
pub mod form;
pub mod password;
pub mod slug;
pub mod token;
