//! Asset and category management service

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::{Asset, AssetDetails, AssetQuery, CreateAsset, UpdateAsset},
        asset_history::CreateAssetHistory,
        category::{Category, CreateCategory, UpdateCategory},
        enums::ChangeType,
    },
    repository::Repository,
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
    audit: AuditService,
}

impl AssetsService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    // -- Categories ---------------------------------------------------------

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    pub async fn get_category(&self, id: i32) -> AppResult<Category> {
        self.repository.categories.get_by_id(id).await
    }

    pub async fn create_category(&self, data: CreateCategory) -> AppResult<Category> {
        self.repository.categories.create(&data).await
    }

    pub async fn update_category(&self, id: i32, data: UpdateCategory) -> AppResult<Category> {
        self.repository.categories.update(id, &data).await
    }

    pub async fn delete_category(&self, id: i32) -> AppResult<Category> {
        self.repository.categories.delete(id).await
    }

    // -- Assets -------------------------------------------------------------

    pub async fn list_assets(&self, query: AssetQuery) -> AppResult<Vec<AssetDetails>> {
        self.repository.assets.list(&query).await
    }

    pub async fn get_asset(&self, id: i32) -> AppResult<AssetDetails> {
        self.repository.assets.get_details(id).await
    }

    /// Create an asset and append a `created` history entry
    pub async fn create_asset(&self, data: CreateAsset, changed_by: i32) -> AppResult<Asset> {
        if !self.repository.categories.exists(data.category_id).await? {
            return Err(AppError::Validation("Category does not exist".to_string()));
        }

        let asset = self.repository.assets.create(&data).await?;

        self.audit
            .record(CreateAssetHistory {
                asset_id: asset.id,
                changed_by,
                change_type: ChangeType::Created,
                old_value: None,
                new_value: Some(asset.name.clone()),
                notes: None,
            })
            .await;

        Ok(asset)
    }

    /// Update an asset, logging status/condition transitions distinctly
    pub async fn update_asset(
        &self,
        id: i32,
        data: UpdateAsset,
        changed_by: i32,
    ) -> AppResult<Asset> {
        if let Some(category_id) = data.category_id {
            if !self.repository.categories.exists(category_id).await? {
                return Err(AppError::Validation("Category does not exist".to_string()));
            }
        }

        let before = self.repository.assets.get_by_id(id).await?;
        let after = self.repository.assets.update(id, &data).await?;

        let (change_type, old_value, new_value) = if before.status != after.status {
            (
                ChangeType::StatusChanged,
                Some(before.status.to_string()),
                Some(after.status.to_string()),
            )
        } else if before.physical_condition != after.physical_condition {
            (
                ChangeType::ConditionChanged,
                Some(before.physical_condition.to_string()),
                Some(after.physical_condition.to_string()),
            )
        } else {
            (ChangeType::Updated, None, Some(after.name.clone()))
        };

        self.audit
            .record(CreateAssetHistory {
                asset_id: id,
                changed_by,
                change_type,
                old_value,
                new_value,
                notes: None,
            })
            .await;

        Ok(after)
    }

    /// Delete an asset; fails while loans or requests reference it
    pub async fn delete_asset(&self, id: i32) -> AppResult<Asset> {
        self.repository.assets.delete(id).await
    }
}
