//! Notifications repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::notification::{CreateNotification, Notification, NotificationQuery},
};

#[derive(Clone)]
pub struct NotificationsRepository {
    pool: Pool<Postgres>,
}

impl NotificationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List notifications, newest first, optionally filtered
    pub async fn list(&self, query: &NotificationQuery) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE ($1::int4 IS NULL OR user_id = $1)
              AND ($2::bool IS NULL OR is_read = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(query.user_id)
        .bind(query.is_read)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get notification by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notification with ID {} not found", id)))
    }

    /// Create a notification
    pub async fn create(
        &self,
        data: &CreateNotification,
        at: DateTime<Utc>,
    ) -> AppResult<Notification> {
        let row = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (
                user_id, message, type, is_read, created_at,
                related_loan_id, related_asset_id
            )
            VALUES ($1, $2, $3, FALSE, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.user_id)
        .bind(&data.message)
        .bind(data.notification_type)
        .bind(at)
        .bind(data.related_loan_id)
        .bind(data.related_asset_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Mark a notification read; already-read is an invalid state
    pub async fn mark_read(&self, id: i32, at: DateTime<Utc>) -> AppResult<Notification> {
        let notification = self.get_by_id(id).await?;
        if notification.is_read {
            return Err(AppError::InvalidState(
                "Notification already marked as read".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = TRUE, read_at = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Mark all of a user's unread notifications read; returns the count
    pub async fn mark_all_read(&self, user_id: i32, at: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = $2 WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a notification
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Notification with ID {} not found",
                id
            )));
        }
        Ok(())
    }
}
