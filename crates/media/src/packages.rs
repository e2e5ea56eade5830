//! Package curation: group assets into donor packages and publish them.
//!
//! Packages move `draft` <-> `published` in both directions. Each real
//! transition to `published` re-stamps `published_at` and enqueues one
//! donor notification; the notification runs after the status write has
//! committed and cannot undo it.

use std::sync::Arc;

use kurban_cloud::ObjectStorage;
use kurban_core::error::CoreError;
use kurban_core::media::media_kind;
use kurban_core::package::{resolve_positions, validate_note, validate_title, PackageStatus};
use kurban_core::types::DbId;
use kurban_db::models::media_package::{MediaPackage, NewMediaPackage, PackageDetailsUpdate};
use kurban_db::MediaStore;
use kurban_events::{NotificationJob, NotificationQueue};

use crate::dto::{
    AddItemsRequest, CreatePackageRequest, DonorPackage, DonorPackageItem, PackageDetail,
    UpdatePackageRequest,
};
use crate::error::MediaResult;

fn package_not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "media package",
        id,
    }
}

/// Creates, fills, edits and publishes media packages.
#[derive(Clone)]
pub struct PackageCurator {
    store: Arc<dyn MediaStore>,
    storage: Arc<dyn ObjectStorage>,
    notifications: NotificationQueue,
}

impl PackageCurator {
    pub fn new(
        store: Arc<dyn MediaStore>,
        storage: Arc<dyn ObjectStorage>,
        notifications: NotificationQueue,
    ) -> Self {
        Self {
            store,
            storage,
            notifications,
        }
    }

    /// Create an empty draft package for an existing donation.
    pub async fn create_package(
        &self,
        input: CreatePackageRequest,
        operator_id: Option<DbId>,
    ) -> MediaResult<MediaPackage> {
        validate_title(&input.title)?;
        validate_note(input.note.as_deref())?;

        if !self.store.donation_exists(input.donation_id).await? {
            return Err(CoreError::NotFound {
                entity: "donation",
                id: input.donation_id,
            }
            .into());
        }

        let package = self
            .store
            .insert_package(&NewMediaPackage {
                donation_id: input.donation_id,
                title: input.title,
                note: input.note,
                created_by: operator_id,
            })
            .await?;

        tracing::info!(
            package_id = %package.id,
            donation_id = %package.donation_id,
            "Media package created"
        );
        Ok(package)
    }

    /// Upsert a batch of items, all or nothing.
    ///
    /// Positions default to the index in the request. Assets in any review
    /// status may be attached. Returns the number of items in the request.
    pub async fn add_items(&self, package_id: DbId, input: AddItemsRequest) -> MediaResult<usize> {
        if self.store.find_package(package_id).await?.is_none() {
            return Err(package_not_found(package_id).into());
        }

        let missing = self.store.missing_asset_ids(&input.media_asset_ids).await?;
        if let Some(&id) = missing.first() {
            return Err(CoreError::NotFound {
                entity: "media asset",
                id,
            }
            .into());
        }

        let items = resolve_positions(&input.media_asset_ids, input.positions.as_deref());
        if let Err(e) = self.store.upsert_package_items(package_id, &items).await {
            tracing::error!(
                package_id = %package_id,
                items = items.len(),
                error = %e,
                "Item batch rolled back"
            );
            return Err(CoreError::Transaction(format!(
                "could not add {} items to package {package_id}",
                items.len()
            ))
            .into());
        }

        tracing::info!(package_id = %package_id, items = items.len(), "Package items upserted");
        Ok(items.len())
    }

    /// Move a package to `status`.
    ///
    /// Writing the current status again is a no-op: nothing is re-stamped and
    /// no notification fires.
    pub async fn set_status(
        &self,
        package_id: DbId,
        status: PackageStatus,
    ) -> MediaResult<MediaPackage> {
        let change = self
            .store
            .set_package_status(package_id, status)
            .await?
            .ok_or_else(|| package_not_found(package_id))?;

        self.record_status_change(package_id, status, change.changed);
        Ok(change.package)
    }

    fn record_status_change(&self, package_id: DbId, status: PackageStatus, changed: bool) {
        if changed {
            tracing::info!(package_id = %package_id, status = %status, "Package status changed");
            if status == PackageStatus::Published {
                self.notifications
                    .enqueue(NotificationJob::PackagePublished { package_id });
            }
        } else {
            tracing::debug!(package_id = %package_id, status = %status, "Package already in status");
        }
    }

    /// Apply a partial update. Draft details and any status change are
    /// written together: both land or neither does.
    pub async fn update(
        &self,
        package_id: DbId,
        input: UpdatePackageRequest,
    ) -> MediaResult<MediaPackage> {
        let status = input
            .status
            .as_deref()
            .map(str::parse::<PackageStatus>)
            .transpose()?;
        if let Some(title) = &input.title {
            validate_title(title)?;
        }
        validate_note(input.note.as_deref())?;

        if input.title.is_none() && input.note.is_none() {
            return match status {
                Some(status) => self.set_status(package_id, status).await,
                None => Err(CoreError::Validation(
                    "at least one of status, title or note is required".to_string(),
                )
                .into()),
            };
        }

        let details = PackageDetailsUpdate {
            title: input.title,
            note: input.note,
        };
        let Some(change) = self
            .store
            .update_package_details(package_id, &details, status)
            .await?
        else {
            return Err(match self.store.find_package(package_id).await? {
                None => package_not_found(package_id),
                Some(_) => CoreError::Conflict("only draft packages can be edited".to_string()),
            }
            .into());
        };

        tracing::info!(package_id = %package_id, "Package details updated");
        if let Some(status) = status {
            self.record_status_change(package_id, status, change.changed);
        }
        Ok(change.package)
    }

    /// Operator view: the package and its items in donor order.
    pub async fn get(&self, package_id: DbId) -> MediaResult<PackageDetail> {
        let package = self
            .store
            .find_package(package_id)
            .await?
            .ok_or_else(|| package_not_found(package_id))?;
        let items = self.store.list_package_items(package_id).await?;
        Ok(PackageDetail { package, items })
    }

    /// Donor view of a published package owned by `user_id`.
    ///
    /// Drafts and packages of other donors are reported as not found.
    pub async fn donor_view(&self, package_id: DbId, user_id: DbId) -> MediaResult<DonorPackage> {
        let package = self
            .store
            .find_package(package_id)
            .await?
            .filter(|p| p.status == PackageStatus::Published.as_str())
            .ok_or_else(|| package_not_found(package_id))?;

        let owner = self.store.donation_owner(package.donation_id).await?;
        if owner != Some(user_id) {
            tracing::debug!(
                package_id = %package_id,
                user_id = %user_id,
                "Donor package requested by non-owner"
            );
            return Err(package_not_found(package_id).into());
        }

        let expiry = self.storage.default_expiry();
        let mut items = Vec::new();
        for item in self.store.list_package_items(package_id).await? {
            let url = self
                .storage
                .presign_get(&item.storage_key, Some(&item.mime_type), expiry)
                .await
                .map_err(|e| {
                    tracing::error!(
                        package_id = %package_id,
                        storage_key = %item.storage_key,
                        error = %e,
                        "Failed to presign download URL"
                    );
                    CoreError::Dependency(e.to_string())
                })?;

            items.push(DonorPackageItem {
                media_asset_id: item.media_asset_id,
                kind: media_kind(&item.mime_type),
                mime_type: item.mime_type,
                position: item.position,
                url,
            });
        }

        Ok(DonorPackage {
            package_id: package.id,
            title: package.title,
            note: package.note,
            published_at: package.published_at,
            items,
        })
    }
}
