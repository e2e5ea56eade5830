//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod donation_repo;
pub mod media_asset_repo;
pub mod media_package_repo;
pub mod push_token_repo;
pub mod stream_repo;

pub use donation_repo::DonationRepo;
pub use media_asset_repo::MediaAssetRepo;
pub use media_package_repo::MediaPackageRepo;
pub use push_token_repo::PushTokenRepo;
pub use stream_repo::StreamRepo;
