//! In-memory [`MediaStore`] used by tests and local runs without Postgres.
//!
//! Mirrors the Postgres semantics the components rely on: foreign keys on
//! package items, the `(package_id, media_asset_id)` uniqueness, atomic item
//! batches, conditional status updates and insertion-order tie breaking.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use kurban_core::media::AssetStatus;
use kurban_core::package::PackageStatus;
use kurban_core::stream::{STREAM_STATUS_LIVE, STREAM_STATUS_SCHEDULED};
use kurban_core::types::DbId;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::media_asset::{AssetFilter, AssetReview, MediaAsset, NewMediaAsset};
use crate::models::media_package::{
    MediaPackage, NewMediaPackage, PackageDetailsUpdate, PackageItem, PackageStatusChange,
};
use crate::models::recipient::Stream;
use crate::store::MediaStore;

#[derive(Debug, Clone)]
struct ItemRow {
    package_id: DbId,
    media_asset_id: DbId,
    position: i32,
    seq: i64,
}

#[derive(Default)]
struct State {
    assets: Vec<MediaAsset>,
    packages: HashMap<DbId, MediaPackage>,
    items: Vec<ItemRow>,
    next_seq: i64,
    /// donation id -> owning user id
    donations: HashMap<DbId, DbId>,
    streams: HashMap<DbId, Stream>,
    /// user id -> tokens, most recently registered first
    push_tokens: HashMap<DbId, Vec<String>>,
    fail_item_upserts: bool,
    fail_status_writes: bool,
}

/// A [`MediaStore`] holding everything in process memory.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a donation owned by `user_id`, returning its id.
    pub async fn add_donation(&self, user_id: DbId) -> DbId {
        let id = Uuid::new_v4();
        self.state.lock().await.donations.insert(id, user_id);
        id
    }

    /// Register a push token for `user_id`.
    pub async fn add_push_token(&self, user_id: DbId, token: impl Into<String>) {
        self.state
            .lock()
            .await
            .push_tokens
            .entry(user_id)
            .or_default()
            .insert(0, token.into());
    }

    /// Register a scheduled stream owned by `user_id`, returning its id.
    pub async fn add_stream(&self, user_id: DbId, title: impl Into<String>) -> DbId {
        let id = Uuid::new_v4();
        let stream = Stream {
            id,
            user_id,
            title: title.into(),
            status: STREAM_STATUS_SCHEDULED.to_string(),
            started_at: None,
        };
        self.state.lock().await.streams.insert(id, stream);
        id
    }

    /// Make every subsequent item batch fail after its first row.
    pub async fn fail_item_upserts(&self, fail: bool) {
        self.state.lock().await.fail_item_upserts = fail;
    }

    /// Make every subsequent package status change fail.
    pub async fn fail_status_writes(&self, fail: bool) {
        self.state.lock().await.fail_status_writes = fail;
    }
}

fn injected_status_failure() -> sqlx::Error {
    sqlx::Error::Protocol("injected package status failure".to_string())
}

fn apply_status(package: &mut MediaPackage, status: PackageStatus) {
    let now = Utc::now();
    package.status = status.as_str().to_string();
    package.updated_at = now;
    package.published_at = match status {
        PackageStatus::Published => Some(now),
        PackageStatus::Draft => None,
    };
}

fn foreign_key_violation(what: &str, id: DbId) -> sqlx::Error {
    sqlx::Error::Protocol(format!("foreign key violation: {what} {id} does not exist"))
}

#[async_trait]
impl MediaStore for MemoryStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn insert_asset(&self, input: &NewMediaAsset) -> Result<MediaAsset, sqlx::Error> {
        let asset = MediaAsset {
            id: Uuid::new_v4(),
            owner_donation_id: input.owner_donation_id,
            broadcast_id: input.broadcast_id,
            storage_key: input.storage_key.clone(),
            mime_type: input.mime_type.clone(),
            duration_seconds: input.duration_seconds,
            width: input.width,
            height: input.height,
            size_bytes: input.size_bytes,
            status: AssetStatus::Uploaded.as_str().to_string(),
            created_by: input.created_by,
            created_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
            review_note: None,
        };
        self.state.lock().await.assets.push(asset.clone());
        Ok(asset)
    }

    async fn find_asset(&self, id: DbId) -> Result<Option<MediaAsset>, sqlx::Error> {
        let state = self.state.lock().await;
        Ok(state.assets.iter().find(|a| a.id == id).cloned())
    }

    async fn review_asset(
        &self,
        id: DbId,
        review: &AssetReview,
    ) -> Result<Option<MediaAsset>, sqlx::Error> {
        let mut state = self.state.lock().await;
        let Some(asset) = state.assets.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        asset.status = review.status.as_str().to_string();
        asset.reviewed_by = review.reviewed_by;
        asset.reviewed_at = Some(Utc::now());
        asset.review_note = review.note.clone();
        Ok(Some(asset.clone()))
    }

    async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let state = self.state.lock().await;
        let mut matched: Vec<MediaAsset> = state
            .assets
            .iter()
            .rev()
            .filter(|a| filter.status.is_none_or(|s| a.status == s.as_str()))
            .filter(|a| {
                filter
                    .owner_donation_id
                    .is_none_or(|d| a.owner_donation_id == Some(d))
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched.truncate(filter.limit.max(0) as usize);
        Ok(matched)
    }

    async fn missing_asset_ids(&self, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        let state = self.state.lock().await;
        let mut missing: Vec<DbId> = Vec::new();
        for id in ids {
            if !state.assets.iter().any(|a| a.id == *id) && !missing.contains(id) {
                missing.push(*id);
            }
        }
        Ok(missing)
    }

    async fn insert_package(&self, input: &NewMediaPackage) -> Result<MediaPackage, sqlx::Error> {
        let mut state = self.state.lock().await;
        if !state.donations.contains_key(&input.donation_id) {
            return Err(foreign_key_violation("donation", input.donation_id));
        }
        let now = Utc::now();
        let package = MediaPackage {
            id: Uuid::new_v4(),
            donation_id: input.donation_id,
            title: input.title.clone(),
            note: input.note.clone(),
            status: PackageStatus::Draft.as_str().to_string(),
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
            published_at: None,
        };
        state.packages.insert(package.id, package.clone());
        Ok(package)
    }

    async fn find_package(&self, id: DbId) -> Result<Option<MediaPackage>, sqlx::Error> {
        Ok(self.state.lock().await.packages.get(&id).cloned())
    }

    async fn update_package_details(
        &self,
        id: DbId,
        input: &PackageDetailsUpdate,
        status: Option<PackageStatus>,
    ) -> Result<Option<PackageStatusChange>, sqlx::Error> {
        let mut state = self.state.lock().await;
        let fail_status_writes = state.fail_status_writes;
        let Some(package) = state.packages.get_mut(&id) else {
            return Ok(None);
        };
        if package.status != PackageStatus::Draft.as_str() {
            return Ok(None);
        }

        // Stage on a copy so a failed status write keeps the old details.
        let mut staged = package.clone();
        if let Some(title) = &input.title {
            staged.title = title.clone();
        }
        if let Some(note) = &input.note {
            staged.note = Some(note.clone());
        }
        staged.updated_at = Utc::now();

        let changed = match status {
            Some(status) if staged.status != status.as_str() => {
                if fail_status_writes {
                    return Err(injected_status_failure());
                }
                apply_status(&mut staged, status);
                true
            }
            _ => false,
        };

        *package = staged.clone();
        Ok(Some(PackageStatusChange {
            package: staged,
            changed,
        }))
    }

    async fn set_package_status(
        &self,
        id: DbId,
        status: PackageStatus,
    ) -> Result<Option<PackageStatusChange>, sqlx::Error> {
        let mut state = self.state.lock().await;
        let fail_status_writes = state.fail_status_writes;
        let Some(package) = state.packages.get_mut(&id) else {
            return Ok(None);
        };
        if package.status == status.as_str() {
            return Ok(Some(PackageStatusChange {
                package: package.clone(),
                changed: false,
            }));
        }
        if fail_status_writes {
            return Err(injected_status_failure());
        }
        apply_status(package, status);
        Ok(Some(PackageStatusChange {
            package: package.clone(),
            changed: true,
        }))
    }

    async fn upsert_package_items(
        &self,
        package_id: DbId,
        items: &[(DbId, i32)],
    ) -> Result<u64, sqlx::Error> {
        let mut state = self.state.lock().await;
        if !state.packages.contains_key(&package_id) {
            return Err(foreign_key_violation("media package", package_id));
        }

        // Stage the batch on a copy so a failure leaves no partial state.
        let mut staged = state.items.clone();
        let mut next_seq = state.next_seq;

        for (applied, (media_asset_id, position)) in items.iter().enumerate() {
            if state.fail_item_upserts && applied > 0 {
                return Err(sqlx::Error::Protocol(
                    "injected item upsert failure".to_string(),
                ));
            }
            if !state.assets.iter().any(|a| a.id == *media_asset_id) {
                return Err(foreign_key_violation("media asset", *media_asset_id));
            }
            match staged
                .iter_mut()
                .find(|i| i.package_id == package_id && i.media_asset_id == *media_asset_id)
            {
                Some(existing) => existing.position = *position,
                None => {
                    next_seq += 1;
                    staged.push(ItemRow {
                        package_id,
                        media_asset_id: *media_asset_id,
                        position: *position,
                        seq: next_seq,
                    });
                }
            }
        }

        state.items = staged;
        state.next_seq = next_seq;
        Ok(items.len() as u64)
    }

    async fn list_package_items(&self, package_id: DbId) -> Result<Vec<PackageItem>, sqlx::Error> {
        let state = self.state.lock().await;
        let mut rows: Vec<&ItemRow> = state
            .items
            .iter()
            .filter(|i| i.package_id == package_id)
            .collect();
        rows.sort_by_key(|i| (i.position, i.seq));

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                state
                    .assets
                    .iter()
                    .find(|a| a.id == row.media_asset_id)
                    .map(|asset| PackageItem {
                        media_asset_id: asset.id,
                        position: row.position,
                        storage_key: asset.storage_key.clone(),
                        mime_type: asset.mime_type.clone(),
                        asset_status: asset.status.clone(),
                        width: asset.width,
                        height: asset.height,
                        duration_seconds: asset.duration_seconds,
                    })
            })
            .collect())
    }

    async fn donation_exists(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.state.lock().await.donations.contains_key(&id))
    }

    async fn donation_owner(&self, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        Ok(self.state.lock().await.donations.get(&id).copied())
    }

    async fn find_stream(&self, id: DbId) -> Result<Option<Stream>, sqlx::Error> {
        Ok(self.state.lock().await.streams.get(&id).cloned())
    }

    async fn mark_stream_live(&self, id: DbId) -> Result<Option<Stream>, sqlx::Error> {
        let mut state = self.state.lock().await;
        let Some(stream) = state.streams.get_mut(&id) else {
            return Ok(None);
        };
        if stream.status == STREAM_STATUS_LIVE {
            return Ok(None);
        }
        stream.status = STREAM_STATUS_LIVE.to_string();
        stream.started_at = Some(Utc::now());
        Ok(Some(stream.clone()))
    }

    async fn push_tokens_for_user(&self, user_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        Ok(self
            .state
            .lock()
            .await
            .push_tokens
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}
