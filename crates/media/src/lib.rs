//! The media workflow components.
//!
//! - [`assets::AssetService`] -- commit, review and list uploaded assets.
//! - [`packages::PackageCurator`] -- curate assets into donor packages and
//!   publish them.
//! - [`uploads::UploadBroker`] -- issue presigned upload URLs.
//! - [`streams::StreamService`] -- start a stream and notify its owner.
//!
//! Every component receives its collaborators at construction time; none
//! holds state of its own beyond those handles.

pub mod assets;
pub mod dto;
pub mod error;
pub mod packages;
pub mod streams;
pub mod uploads;

#[cfg(test)]
mod test_support;

pub use assets::AssetService;
pub use error::{MediaError, MediaResult};
pub use packages::PackageCurator;
pub use streams::StreamService;
pub use uploads::UploadBroker;
