//! Typed row models and DTOs.

pub mod media_asset;
pub mod media_package;
pub mod recipient;
