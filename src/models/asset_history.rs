//! Asset history (audit log) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::ChangeType;

/// Asset history entry (append-only)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssetHistory {
    pub id: i32,
    pub asset_id: i32,
    pub changed_by: i32,
    pub change_type: ChangeType,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
}

/// History entry with asset and user display fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssetHistoryDetails {
    pub id: i32,
    pub asset_id: i32,
    pub asset_name: String,
    pub changed_by: i32,
    pub changed_by_name: String,
    pub change_type: ChangeType,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
}

/// New history entry
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAssetHistory {
    pub asset_id: i32,
    pub changed_by: i32,
    pub change_type: ChangeType,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub notes: Option<String>,
}

/// Status change log payload for the convenience endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct LogStatusChange {
    pub asset_id: i32,
    pub changed_by: i32,
    pub old_status: String,
    pub new_status: String,
    pub notes: Option<String>,
}

/// History list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AssetHistoryQuery {
    pub asset_id: Option<i32>,
    pub change_type: Option<ChangeType>,
}
