pub mod donor;
pub mod media;
pub mod packages;
pub mod streams;
