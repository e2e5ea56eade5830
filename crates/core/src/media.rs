//! Media asset moderation rules.
//!
//! Defines the asset status machine (`uploaded` -> `approved` | `rejected`),
//! the review actions that drive it, the upload mime allow-list and the
//! storage key layout used by the upload broker.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";
pub const MIME_MP4: &str = "video/mp4";

/// Mime types accepted for upload.
pub const ALLOWED_MIME_TYPES: &[&str] = &[MIME_JPEG, MIME_PNG, MIME_MP4];

/// Upper bound on rows returned by an asset listing.
pub const ASSET_LIST_LIMIT: i64 = 200;

/// Root prefix for every media object in the bucket.
pub const STORAGE_KEY_PREFIX: &str = "media";

// ---------------------------------------------------------------------------
// Asset status
// ---------------------------------------------------------------------------

/// Moderation state of a media asset.
///
/// `Review` is part of the stored value set but no transition leads to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Uploaded,
    Review,
    Approved,
    Rejected,
}

impl AssetStatus {
    /// Database / wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Review => "review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uploaded" => Ok(Self::Uploaded),
            "review" => Ok(Self::Review),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "Invalid asset status '{other}'. Must be one of: uploaded, review, approved, rejected"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Review action
// ---------------------------------------------------------------------------

/// Operator decision on an uploaded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    /// Status the asset moves to when this action is applied.
    pub fn target_status(self) -> AssetStatus {
        match self {
            Self::Approve => AssetStatus::Approved,
            Self::Reject => AssetStatus::Rejected,
        }
    }
}

impl FromStr for ReviewAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            other => Err(CoreError::Validation(format!(
                "Invalid review action '{other}'. Must be one of: approve, reject"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Mime types
// ---------------------------------------------------------------------------

/// Validate that `mime_type` is on the upload allow-list.
pub fn validate_mime_type(mime_type: &str) -> Result<(), CoreError> {
    if ALLOWED_MIME_TYPES.contains(&mime_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported mime type '{mime_type}'. Must be one of: {}",
            ALLOWED_MIME_TYPES.join(", ")
        )))
    }
}

/// File extension (with leading dot) for a mime type, or `""` if unmapped.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        MIME_JPEG => ".jpg",
        MIME_PNG => ".png",
        MIME_MP4 => ".mp4",
        _ => "",
    }
}

/// Coarse media kind shown to donors: `"video"` for `video/*`, else `"image"`.
pub fn media_kind(mime_type: &str) -> &'static str {
    if mime_type.starts_with("video/") {
        "video"
    } else {
        "image"
    }
}

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

/// Build the object key for a new upload.
///
/// Layout: `media/{year}/{month:02}/{donation_id}/{random_id}{ext}`.
pub fn build_storage_key(
    now: Timestamp,
    donation_id: DbId,
    random_id: uuid::Uuid,
    mime_type: &str,
) -> String {
    format!(
        "{STORAGE_KEY_PREFIX}/{}/{:02}/{donation_id}/{random_id}{}",
        now.year(),
        now.month(),
        extension_for_mime(mime_type),
    )
}

/// Validate a storage key supplied on commit.
pub fn validate_storage_key(key: &str) -> Result<(), CoreError> {
    if key.trim().is_empty() {
        return Err(CoreError::Validation(
            "storageKey must not be empty".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            AssetStatus::Uploaded,
            AssetStatus::Review,
            AssetStatus::Approved,
            AssetStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<AssetStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("pending".parse::<AssetStatus>().is_err());
        assert!("".parse::<AssetStatus>().is_err());
    }

    #[test]
    fn review_actions_map_to_statuses() {
        let approve: ReviewAction = "approve".parse().unwrap();
        let reject: ReviewAction = "reject".parse().unwrap();
        assert_eq!(approve.target_status(), AssetStatus::Approved);
        assert_eq!(reject.target_status(), AssetStatus::Rejected);
    }

    #[test]
    fn unknown_review_action_is_validation_error() {
        let err = "maybe".parse::<ReviewAction>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!("Approve".parse::<ReviewAction>().is_err());
    }

    #[test]
    fn mime_allow_list() {
        assert!(validate_mime_type("image/jpeg").is_ok());
        assert!(validate_mime_type("image/png").is_ok());
        assert!(validate_mime_type("video/mp4").is_ok());
        assert!(validate_mime_type("application/zip").is_err());
        assert!(validate_mime_type("image/gif").is_err());
    }

    #[test]
    fn extensions() {
        assert_eq!(extension_for_mime("image/jpeg"), ".jpg");
        assert_eq!(extension_for_mime("image/png"), ".png");
        assert_eq!(extension_for_mime("video/mp4"), ".mp4");
        assert_eq!(extension_for_mime("text/plain"), "");
    }

    #[test]
    fn media_kinds() {
        assert_eq!(media_kind("video/mp4"), "video");
        assert_eq!(media_kind("image/png"), "image");
    }

    #[test]
    fn storage_key_layout() {
        let now = chrono::Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();
        let donation = uuid::Uuid::nil();
        let random = uuid::Uuid::from_u128(1);
        let key = build_storage_key(now, donation, random, "image/jpeg");
        assert_eq!(
            key,
            format!("media/2025/03/{donation}/{random}.jpg")
        );
    }

    #[test]
    fn storage_key_without_extension_for_unmapped_mime() {
        let now = chrono::Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap();
        let key = build_storage_key(now, uuid::Uuid::nil(), uuid::Uuid::nil(), "text/plain");
        assert!(key.starts_with("media/2025/11/"));
        assert!(key.ends_with(&uuid::Uuid::nil().to_string()));
    }

    #[test]
    fn empty_storage_key_is_rejected() {
        assert!(validate_storage_key("").is_err());
        assert!(validate_storage_key("   ").is_err());
        assert!(validate_storage_key("media/2025/01/x/y.jpg").is_ok());
    }
}
