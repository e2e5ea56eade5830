//! Media package curation rules.
//!
//! Packages move between `draft` and `published` in both directions,
//! unlike assets whose review is one-way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length for a package title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for a package note.
pub const MAX_NOTE_LENGTH: usize = 2_000;

/// Publication state of a media package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    Draft,
    Published,
}

impl PackageStatus {
    /// Database / wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(CoreError::Validation(format!(
                "Invalid package status '{other}'. Must be one of: draft, published"
            ))),
        }
    }
}

/// Pair each asset id with its position.
///
/// The caller-supplied position at the same index wins; otherwise the
/// zero-based index in `asset_ids` is used. Extra positions are ignored.
pub fn resolve_positions(asset_ids: &[DbId], positions: Option<&[i32]>) -> Vec<(DbId, i32)> {
    asset_ids
        .iter()
        .enumerate()
        .map(|(idx, id)| {
            let position = positions
                .and_then(|p| p.get(idx).copied())
                .unwrap_or(idx as i32);
            (*id, position)
        })
        .collect()
}

/// Validate an operator-supplied package title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an optional package note.
pub fn validate_note(note: Option<&str>) -> Result<(), CoreError> {
    match note {
        Some(n) if n.chars().count() > MAX_NOTE_LENGTH => Err(CoreError::Validation(format!(
            "note exceeds maximum length of {MAX_NOTE_LENGTH} characters"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn status_parsing() {
        assert_eq!("draft".parse::<PackageStatus>().unwrap(), PackageStatus::Draft);
        assert_eq!(
            "published".parse::<PackageStatus>().unwrap(),
            PackageStatus::Published
        );
        assert!("archived".parse::<PackageStatus>().is_err());
        assert!("PUBLISHED".parse::<PackageStatus>().is_err());
    }

    #[test]
    fn positions_default_to_index() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let resolved = resolve_positions(&ids, None);
        assert_eq!(
            resolved,
            vec![(ids[0], 0), (ids[1], 1), (ids[2], 2)]
        );
    }

    #[test]
    fn explicit_positions_win_where_present() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let resolved = resolve_positions(&ids, Some(&[10, 5]));
        assert_eq!(
            resolved,
            vec![(ids[0], 10), (ids[1], 5), (ids[2], 2)]
        );
    }

    #[test]
    fn surplus_positions_are_ignored() {
        let ids = [Uuid::new_v4()];
        let resolved = resolve_positions(&ids, Some(&[7, 8, 9]));
        assert_eq!(resolved, vec![(ids[0], 7)]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(resolve_positions(&[], Some(&[1])).is_empty());
    }

    #[test]
    fn title_validation() {
        assert!(validate_title("Kesim Anıları").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("  ").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn note_validation() {
        assert!(validate_note(None).is_ok());
        assert!(validate_note(Some("short")).is_ok());
        assert!(validate_note(Some(&"n".repeat(MAX_NOTE_LENGTH + 1))).is_err());
    }
}
