//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::NotificationType;

/// Notification record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub message: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub related_loan_id: Option<i32>,
    pub related_asset_id: Option<i32>,
}

/// New notification
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateNotification {
    pub user_id: i32,
    #[validate(length(min = 1, max = 500, message = "Message must be 1-500 characters"))]
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub related_loan_id: Option<i32>,
    pub related_asset_id: Option<i32>,
}

/// Notification list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct NotificationQuery {
    pub user_id: Option<i32>,
    pub is_read: Option<bool>,
}
