//! Domain rules for the donation media workflow.
//!
//! Everything in this crate is pure: no database, storage or network
//! access. The `db`, `media` and `api` crates build on these types.

pub mod error;
pub mod media;
pub mod notification;
pub mod package;
pub mod roles;
pub mod stream;
pub mod types;
