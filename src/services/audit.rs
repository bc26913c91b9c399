//! Best-effort audit logging
//!
//! History writes are a side channel: a failed append must never roll back
//! the state transition it describes, so every failure is downgraded to a
//! warning.

use chrono::Utc;

use crate::{
    error::AppResult,
    models::asset_history::{
        AssetHistory, AssetHistoryDetails, AssetHistoryQuery, CreateAssetHistory,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuditService {
    repository: Repository,
}

impl AuditService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List history entries, optionally filtered
    pub async fn list(&self, query: AssetHistoryQuery) -> AppResult<Vec<AssetHistoryDetails>> {
        self.repository.history.list(&query).await
    }

    /// Get a single history entry
    pub async fn get(&self, id: i32) -> AppResult<AssetHistoryDetails> {
        self.repository.history.get_details(id).await
    }

    /// List history for one asset, newest first
    pub async fn list_by_asset(&self, asset_id: i32) -> AppResult<Vec<AssetHistoryDetails>> {
        self.repository.history.list_by_asset(asset_id).await
    }

    /// Append a history entry, swallowing failures with a warning
    pub async fn record(&self, entry: CreateAssetHistory) {
        if let Err(e) = self.repository.history.create(&entry, Utc::now()).await {
            tracing::warn!(
                asset_id = entry.asset_id,
                change_type = %entry.change_type,
                "Failed to write asset history entry: {}",
                e
            );
        }
    }

    /// Append a history entry and surface the result (manual logging API)
    pub async fn log(&self, entry: &CreateAssetHistory) -> AppResult<AssetHistory> {
        // Manual entries validate their references, unlike the hooks above.
        self.repository.assets.get_by_id(entry.asset_id).await?;
        self.repository.users.get_by_id(entry.changed_by).await?;
        self.repository.history.create(entry, Utc::now()).await
    }
}
