//! Wire types shared by every endpoint.

pub mod api;
