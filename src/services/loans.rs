//! Loan lifecycle service
//!
//! `Active → Returned`, terminal. Checkout and return delegate the
//! multi-table writes to the repository transaction; history entries are
//! appended best-effort afterwards.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        asset_history::CreateAssetHistory,
        enums::{AssetStatus, ChangeType},
        loan::{CreateLoan, Loan, LoanDetails, LoanQuery, ReturnLoan},
    },
    repository::Repository,
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    audit: AuditService,
}

impl LoansService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    /// List loans with display fields
    pub async fn list(&self, query: LoanQuery) -> AppResult<Vec<LoanDetails>> {
        self.repository.loans.list(&query).await
    }

    /// Get a single loan with display fields
    pub async fn get(&self, id: i32) -> AppResult<LoanDetails> {
        self.repository.loans.get_details(id).await
    }

    /// List active loans past their due date
    pub async fn list_overdue(&self) -> AppResult<Vec<LoanDetails>> {
        self.repository.loans.list_overdue(Utc::now()).await
    }

    /// Direct checkout, bypassing the request workflow (staff-initiated)
    pub async fn create(&self, data: CreateLoan) -> AppResult<Loan> {
        let user = self.repository.users.get_by_id(data.user_id).await?;
        if !user.is_active {
            return Err(AppError::PreconditionFailed(
                "User account is inactive".to_string(),
            ));
        }

        if let Some(staff_id) = data.approved_by_staff_id {
            let staff = self.repository.users.get_by_id(staff_id).await.map_err(|_| {
                AppError::Validation("Invalid staff member".to_string())
            })?;
            if !staff.role.is_staff() {
                return Err(AppError::Validation("Invalid staff member".to_string()));
            }
        }

        let now = Utc::now();
        let loan = self.repository.loans.create_checkout(&data, now).await?;

        self.audit
            .record(CreateAssetHistory {
                asset_id: loan.asset_id,
                changed_by: loan.approved_by_staff_id.unwrap_or(loan.user_id),
                change_type: ChangeType::Loaned,
                old_value: Some(AssetStatus::Available.to_string()),
                new_value: Some(AssetStatus::CheckedOut.to_string()),
                notes: Some(format!("Loan {} checked out", loan.id)),
            })
            .await;

        Ok(loan)
    }

    /// Return an active loan
    pub async fn return_loan(&self, id: i32, data: ReturnLoan) -> AppResult<Loan> {
        if let Some(staff_id) = data.received_by_staff_id {
            let staff = self.repository.users.get_by_id(staff_id).await.map_err(|_| {
                AppError::Validation("Invalid staff member".to_string())
            })?;
            if !staff.role.is_staff() {
                return Err(AppError::Validation("Invalid staff member".to_string()));
            }
        }

        let now = Utc::now();
        let loan = self.repository.loans.return_loan(id, &data, now).await?;

        self.audit
            .record(CreateAssetHistory {
                asset_id: loan.asset_id,
                changed_by: loan.received_by_staff_id.unwrap_or(loan.user_id),
                change_type: ChangeType::Returned,
                old_value: Some(AssetStatus::CheckedOut.to_string()),
                new_value: Some(AssetStatus::Available.to_string()),
                notes: (loan.overdue_days > 0)
                    .then(|| format!("Returned {} day(s) overdue", loan.overdue_days)),
            })
            .await;

        Ok(loan)
    }
}
