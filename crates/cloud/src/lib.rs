//! Object storage for media uploads.
//!
//! Components depend on the [`ObjectStorage`] trait; [`S3Storage`] implements
//! it against any S3-compatible endpoint (AWS, R2, MinIO).

pub mod config;
pub mod s3;
pub mod storage;

pub use config::StorageConfig;
pub use s3::S3Storage;
pub use storage::{ObjectStorage, StorageError};
