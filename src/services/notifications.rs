//! Notification service, including the overdue reminder sweep

use chrono::Utc;

use crate::{
    error::AppResult,
    models::{
        loan::overdue_days,
        notification::{CreateNotification, Notification, NotificationQuery},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct NotificationsService {
    repository: Repository,
}

impl NotificationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List notifications, optionally filtered by user and read state
    pub async fn list(&self, query: NotificationQuery) -> AppResult<Vec<Notification>> {
        self.repository.notifications.list(&query).await
    }

    /// Get a notification by ID
    pub async fn get(&self, id: i32) -> AppResult<Notification> {
        self.repository.notifications.get_by_id(id).await
    }

    /// Create a notification for a user
    pub async fn create(&self, data: CreateNotification) -> AppResult<Notification> {
        self.repository.users.get_by_id(data.user_id).await?;
        self.repository.notifications.create(&data, Utc::now()).await
    }

    /// Mark a single notification read
    pub async fn mark_read(&self, id: i32) -> AppResult<Notification> {
        self.repository.notifications.mark_read(id, Utc::now()).await
    }

    /// Mark all of a user's notifications read; returns the count affected
    pub async fn mark_all_read(&self, user_id: i32) -> AppResult<u64> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository
            .notifications
            .mark_all_read(user_id, Utc::now())
            .await
    }

    /// Delete a notification
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.notifications.delete(id).await
    }

    /// Sweep active overdue loans and notify each borrower.
    ///
    /// A per-loan watermark keeps the sweep at-most-once-per-day: loans
    /// reminded within the last 24 hours are skipped, so scheduling the
    /// sweep aggressively does not flood borrowers with duplicates. Each
    /// notification commits together with its watermark update.
    pub async fn send_overdue_reminders(&self) -> AppResult<u64> {
        let now = Utc::now();
        let overdue = self.repository.loans.list_due_for_reminder(now).await?;

        let mut sent = 0u64;
        for row in overdue {
            let days = overdue_days(row.due_date, now);
            let message = format!(
                "Your loan for '{}' is overdue by {} day(s). Please return it immediately.",
                row.asset_name, days
            );

            self.repository
                .loans
                .record_reminder(row.loan_id, row.user_id, &message, now)
                .await?;
            sent += 1;
        }

        tracing::info!(count = sent, "Overdue reminder sweep completed");
        Ok(sent)
    }
}
