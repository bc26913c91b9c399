//! Loans repository for database operations
//!
//! Checkout and return both touch the loan and the asset row. They run in a
//! single transaction with the asset row locked `FOR UPDATE`, so concurrent
//! checkouts of the same asset serialize and the loser observes the asset as
//! unavailable.

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::Asset,
        enums::{AssetStatus, LoanStatus},
        loan::{overdue_days, CreateLoan, Loan, LoanDetails, LoanDetailsRow, LoanQuery, ReturnLoan},
        notification::Notification,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT l.id, l.asset_id, a.name AS asset_name, a.serial_number,
           l.user_id, u.first_name || ' ' || u.last_name AS user_name,
           u.university_id AS user_university_id,
           l.approved_by_staff_id,
           s.first_name || ' ' || s.last_name AS approved_by_staff_name,
           l.check_out_date, l.due_date, l.return_date, l.return_condition,
           l.return_notes, l.overdue_days,
           r.first_name || ' ' || r.last_name AS received_by_staff_name,
           l.status
    FROM loans l
    JOIN assets a ON l.asset_id = a.id
    JOIN users u ON l.user_id = u.id
    LEFT JOIN users s ON l.approved_by_staff_id = s.id
    LEFT JOIN users r ON l.received_by_staff_id = r.id
"#;

/// Active loan row selected by the reminder sweep
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OverdueLoanRow {
    pub loan_id: i32,
    pub user_id: i32,
    pub asset_name: String,
    pub due_date: DateTime<Utc>,
}

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan with display fields by ID
    pub async fn get_details(&self, id: i32) -> AppResult<LoanDetails> {
        let sql = format!("{} WHERE l.id = $1", DETAILS_SELECT);
        let row = sqlx::query_as::<_, LoanDetailsRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with ID {} not found", id)))?;
        Ok(row.into_details(Utc::now()))
    }

    /// List loans with display fields, optionally filtered
    pub async fn list(&self, query: &LoanQuery) -> AppResult<Vec<LoanDetails>> {
        let sql = format!(
            r#"{}
            WHERE ($1::text IS NULL OR l.status = $1)
              AND ($2::int4 IS NULL OR l.user_id = $2)
            ORDER BY l.check_out_date DESC
            "#,
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, LoanDetailsRow>(&sql)
            .bind(query.status)
            .bind(query.user_id)
            .fetch_all(&self.pool)
            .await?;

        let now = Utc::now();
        Ok(rows.into_iter().map(|r| r.into_details(now)).collect())
    }

    /// List active loans past their due date, earliest due first
    pub async fn list_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<LoanDetails>> {
        let sql = format!(
            "{} WHERE l.status = 'active' AND l.due_date < $1 ORDER BY l.due_date",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, LoanDetailsRow>(&sql)
            .bind(now)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|r| r.into_details(now)).collect())
    }

    /// Direct checkout: create an active loan and flip the asset to
    /// checked out, atomically.
    pub async fn create_checkout(&self, data: &CreateLoan, now: DateTime<Utc>) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1 FOR UPDATE")
            .bind(data.asset_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Asset with ID {} not found", data.asset_id))
            })?;

        if !asset.is_loanable() {
            return Err(AppError::PreconditionFailed(format!(
                "Asset is not available. Current status: {}",
                asset.status
            )));
        }

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (
                asset_id, user_id, approved_by_staff_id, check_out_date,
                due_date, status, overdue_days, created_at
            )
            VALUES ($1, $2, $3, $4, $5, 'active', 0, $4)
            RETURNING *
            "#,
        )
        .bind(data.asset_id)
        .bind(data.user_id)
        .bind(data.approved_by_staff_id)
        .bind(now)
        .bind(data.due_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE assets SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(data.asset_id)
            .bind(AssetStatus::CheckedOut)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(loan)
    }

    /// Return a loan: close it, compute overdue days and release the asset,
    /// atomically. The asset's condition is overwritten when a return
    /// condition is supplied.
    pub async fn return_loan(
        &self,
        id: i32,
        data: &ReturnLoan,
        now: DateTime<Utc>,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with ID {} not found", id)))?;

        if loan.status != LoanStatus::Active {
            return Err(AppError::InvalidState(format!(
                "Loan is not active. Current status: {}",
                loan.status
            )));
        }

        let late_days = overdue_days(loan.due_date, now);

        let updated = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans SET
                return_date = $2,
                return_condition = $3,
                return_notes = $4,
                received_by_staff_id = $5,
                overdue_days = $6,
                status = 'returned'
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(now)
        .bind(data.return_condition)
        .bind(&data.return_notes)
        .bind(data.received_by_staff_id)
        .bind(late_days)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE assets SET
                status = 'available',
                physical_condition = COALESCE($2, physical_condition),
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(loan.asset_id)
        .bind(data.return_condition)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Active overdue loans not yet reminded within the last 24 hours
    pub async fn list_due_for_reminder(&self, now: DateTime<Utc>) -> AppResult<Vec<OverdueLoanRow>> {
        let rows = sqlx::query_as::<_, OverdueLoanRow>(
            r#"
            SELECT l.id AS loan_id, l.user_id, a.name AS asset_name, l.due_date
            FROM loans l
            JOIN assets a ON l.asset_id = a.id
            WHERE l.status = 'active'
              AND l.due_date < $1
              AND (l.last_reminder_sent_at IS NULL
                   OR l.last_reminder_sent_at < $1 - INTERVAL '1 day')
            ORDER BY l.due_date
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Record an overdue reminder: insert the notification and advance the
    /// loan's watermark in one transaction. A failure leaves both untouched,
    /// so the next sweep retries the loan without double-notifying.
    pub async fn record_reminder(
        &self,
        loan_id: i32,
        user_id: i32,
        message: &str,
        at: DateTime<Utc>,
    ) -> AppResult<Notification> {
        let mut tx = self.pool.begin().await?;

        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (
                user_id, message, type, is_read, created_at, related_loan_id
            )
            VALUES ($1, $2, 'overdue', FALSE, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(message)
        .bind(at)
        .bind(loan_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE loans SET last_reminder_sent_at = $2 WHERE id = $1")
            .bind(loan_id)
            .bind(at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(notification)
    }
}
