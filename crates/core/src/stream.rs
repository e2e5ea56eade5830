//! Livestream status constants.

/// Stream has been scheduled but not started.
pub const STREAM_STATUS_SCHEDULED: &str = "scheduled";

/// Stream is currently broadcasting.
pub const STREAM_STATUS_LIVE: &str = "live";
