//! Loan request workflow service
//!
//! `Pending → Approved | Rejected`, both terminal. Approval re-validates the
//! asset inside the repository transaction; the requester is notified
//! best-effort after the transition commits.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        asset_history::CreateAssetHistory,
        enums::{AssetStatus, ChangeType, NotificationType},
        loan::Loan,
        loan_request::{
            CreateLoanRequest, LoanRequest, LoanRequestDetails, LoanRequestQuery,
        },
        notification::CreateNotification,
        user::User,
    },
    repository::Repository,
    services::audit::AuditService,
};

#[derive(Clone)]
pub struct LoanRequestsService {
    repository: Repository,
    audit: AuditService,
}

impl LoanRequestsService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    /// List requests with display fields
    pub async fn list(&self, query: LoanRequestQuery) -> AppResult<Vec<LoanRequestDetails>> {
        self.repository.loan_requests.list(&query).await
    }

    /// Get a single request with display fields
    pub async fn get(&self, id: i32) -> AppResult<LoanRequestDetails> {
        self.repository.loan_requests.get_details(id).await
    }

    /// File a new pending request
    pub async fn create(&self, data: CreateLoanRequest) -> AppResult<LoanRequest> {
        let asset = self.repository.assets.get_by_id(data.asset_id).await?;
        let user = self.repository.users.get_by_id(data.user_id).await?;

        if !user.is_active {
            return Err(AppError::InvalidState(
                "User account is inactive".to_string(),
            ));
        }
        if !asset.is_loanable() {
            return Err(AppError::InvalidState(format!(
                "Asset is not available. Current status: {}",
                asset.status
            )));
        }
        if data.requested_end_date <= data.requested_start_date {
            return Err(AppError::Validation(
                "Requested end date must be after the start date".to_string(),
            ));
        }

        self.repository.loan_requests.create(&data, Utc::now()).await
    }

    /// Approve a pending request, creating the loan and checking out the
    /// asset atomically
    pub async fn approve(&self, id: i32, staff_id: i32) -> AppResult<(LoanRequest, Loan)> {
        self.require_staff(staff_id).await?;

        let (request, loan) = self
            .repository
            .loan_requests
            .approve(id, staff_id, Utc::now())
            .await?;

        self.audit
            .record(CreateAssetHistory {
                asset_id: request.asset_id,
                changed_by: staff_id,
                change_type: ChangeType::Loaned,
                old_value: Some(AssetStatus::Available.to_string()),
                new_value: Some(AssetStatus::CheckedOut.to_string()),
                notes: Some(format!("Loan request {} approved", request.id)),
            })
            .await;

        self.notify(
            request.user_id,
            NotificationType::Approved,
            format!(
                "Your loan request has been approved. The equipment is due back on {}.",
                loan.due_date.format("%Y-%m-%d")
            ),
            Some(loan.id),
            Some(request.asset_id),
        )
        .await;

        Ok((request, loan))
    }

    /// Reject a pending request. No asset side effects.
    pub async fn reject(&self, id: i32, staff_id: i32, reason: &str) -> AppResult<LoanRequest> {
        if reason.trim().is_empty() {
            return Err(AppError::Validation(
                "Rejection reason is required".to_string(),
            ));
        }
        self.require_staff(staff_id).await?;

        let request = self
            .repository
            .loan_requests
            .reject(id, staff_id, reason, Utc::now())
            .await?;

        self.notify(
            request.user_id,
            NotificationType::Rejected,
            format!("Your loan request has been rejected: {}", reason),
            None,
            Some(request.asset_id),
        )
        .await;

        Ok(request)
    }

    /// Resolve the reviewer and require a staff or admin role
    async fn require_staff(&self, staff_id: i32) -> AppResult<User> {
        let staff = self
            .repository
            .users
            .get_by_id(staff_id)
            .await
            .map_err(|_| AppError::Validation("Invalid staff member".to_string()))?;
        if !staff.role.is_staff() {
            return Err(AppError::Validation("Invalid staff member".to_string()));
        }
        Ok(staff)
    }

    /// Best-effort notification; failures degrade to a warning
    async fn notify(
        &self,
        user_id: i32,
        notification_type: NotificationType,
        message: String,
        related_loan_id: Option<i32>,
        related_asset_id: Option<i32>,
    ) {
        let data = CreateNotification {
            user_id,
            message,
            notification_type,
            related_loan_id,
            related_asset_id,
        };
        if let Err(e) = self.repository.notifications.create(&data, Utc::now()).await {
            tracing::warn!(
                user_id,
                "Failed to create {} notification: {}",
                notification_type,
                e
            );
        }
    }
}
