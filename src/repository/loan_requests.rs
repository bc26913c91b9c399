//! Loan requests repository for database operations
//!
//! Approval is the one multi-table write in the workflow: the request flips
//! to approved, a loan is created and the asset is checked out in one
//! transaction. The asset row is locked `FOR UPDATE` and re-checked inside
//! the transaction, so two concurrent approvals against the same asset
//! cannot both succeed.

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        asset::Asset,
        enums::{AssetStatus, LoanRequestStatus},
        loan::Loan,
        loan_request::{
            CreateLoanRequest, LoanRequest, LoanRequestDetails, LoanRequestQuery,
        },
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT lr.id, lr.user_id,
           u.first_name || ' ' || u.last_name AS user_name,
           u.university_id,
           lr.asset_id, a.name AS asset_name, a.serial_number,
           lr.request_date, lr.requested_start_date, lr.requested_end_date,
           lr.purpose, lr.status, lr.reviewed_by_staff_id, lr.reviewed_at,
           lr.rejection_reason
    FROM loan_requests lr
    JOIN users u ON lr.user_id = u.id
    JOIN assets a ON lr.asset_id = a.id
"#;

#[derive(Clone)]
pub struct LoanRequestsRepository {
    pool: Pool<Postgres>,
}

impl LoanRequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get request with display fields by ID
    pub async fn get_details(&self, id: i32) -> AppResult<LoanRequestDetails> {
        let sql = format!("{} WHERE lr.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, LoanRequestDetails>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan request with ID {} not found", id)))
    }

    /// List requests with display fields, optionally filtered
    pub async fn list(&self, query: &LoanRequestQuery) -> AppResult<Vec<LoanRequestDetails>> {
        let sql = format!(
            r#"{}
            WHERE ($1::text IS NULL OR lr.status = $1)
              AND ($2::int4 IS NULL OR lr.user_id = $2)
            ORDER BY lr.request_date DESC
            "#,
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, LoanRequestDetails>(&sql)
            .bind(query.status)
            .bind(query.user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Create a pending request
    pub async fn create(
        &self,
        data: &CreateLoanRequest,
        now: DateTime<Utc>,
    ) -> AppResult<LoanRequest> {
        let row = sqlx::query_as::<_, LoanRequest>(
            r#"
            INSERT INTO loan_requests (
                user_id, asset_id, request_date, requested_start_date,
                requested_end_date, purpose, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING *
            "#,
        )
        .bind(data.user_id)
        .bind(data.asset_id)
        .bind(now)
        .bind(data.requested_start_date)
        .bind(data.requested_end_date)
        .bind(&data.purpose)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Approve a pending request: mark it reviewed, create the loan and
    /// check out the asset as one atomic unit.
    pub async fn approve(
        &self,
        id: i32,
        staff_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<(LoanRequest, Loan)> {
        let mut tx = self.pool.begin().await?;

        let request =
            sqlx::query_as::<_, LoanRequest>("SELECT * FROM loan_requests WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Loan request with ID {} not found", id))
                })?;

        if request.status != LoanRequestStatus::Pending {
            return Err(AppError::InvalidState(format!(
                "Request already {}",
                request.status
            )));
        }

        // Re-validate availability under the row lock; the asset may have
        // been claimed since the request was filed.
        let asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1 FOR UPDATE")
            .bind(request.asset_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Asset with ID {} not found", request.asset_id))
            })?;

        if !asset.is_loanable() {
            return Err(AppError::PreconditionFailed(format!(
                "Asset is no longer available. Current status: {}",
                asset.status
            )));
        }

        let approved = sqlx::query_as::<_, LoanRequest>(
            r#"
            UPDATE loan_requests SET
                status = 'approved',
                reviewed_by_staff_id = $2,
                reviewed_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(staff_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

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
        .bind(request.asset_id)
        .bind(request.user_id)
        .bind(staff_id)
        .bind(now)
        .bind(request.requested_end_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE assets SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(request.asset_id)
            .bind(AssetStatus::CheckedOut)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((approved, loan))
    }

    /// Reject a pending request. No asset side effects.
    pub async fn reject(
        &self,
        id: i32,
        staff_id: i32,
        reason: &str,
        now: DateTime<Utc>,
    ) -> AppResult<LoanRequest> {
        let mut tx = self.pool.begin().await?;

        let request =
            sqlx::query_as::<_, LoanRequest>("SELECT * FROM loan_requests WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Loan request with ID {} not found", id))
                })?;

        if request.status != LoanRequestStatus::Pending {
            return Err(AppError::InvalidState(format!(
                "Request already {}",
                request.status
            )));
        }

        let rejected = sqlx::query_as::<_, LoanRequest>(
            r#"
            UPDATE loan_requests SET
                status = 'rejected',
                reviewed_by_staff_id = $2,
                reviewed_at = $3,
                rejection_reason = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(staff_id)
        .bind(now)
        .bind(reason)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(rejected)
    }
}
