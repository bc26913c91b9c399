//! Loan request model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::LoanRequestStatus;

/// Loan request record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanRequest {
    pub id: i32,
    pub user_id: i32,
    pub asset_id: i32,
    pub request_date: DateTime<Utc>,
    pub requested_start_date: DateTime<Utc>,
    pub requested_end_date: DateTime<Utc>,
    pub purpose: Option<String>,
    pub status: LoanRequestStatus,
    /// Null until the request is reviewed
    pub reviewed_by_staff_id: Option<i32>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

impl LoanRequest {
    pub fn is_pending(&self) -> bool {
        self.status == LoanRequestStatus::Pending
    }

    /// Requested loan duration in whole days
    pub fn requested_days(&self) -> i64 {
        (self.requested_end_date - self.requested_start_date).num_days()
    }
}

/// Loan request with requester and asset display fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanRequestDetails {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub university_id: String,
    pub asset_id: i32,
    pub asset_name: String,
    pub serial_number: Option<String>,
    pub request_date: DateTime<Utc>,
    pub requested_start_date: DateTime<Utc>,
    pub requested_end_date: DateTime<Utc>,
    pub purpose: Option<String>,
    pub status: LoanRequestStatus,
    pub reviewed_by_staff_id: Option<i32>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

/// Create loan request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLoanRequest {
    pub user_id: i32,
    pub asset_id: i32,
    pub requested_start_date: DateTime<Utc>,
    pub requested_end_date: DateTime<Utc>,
    #[validate(length(max = 500, message = "Purpose must be at most 500 characters"))]
    pub purpose: Option<String>,
}

/// Approve payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveLoanRequest {
    pub staff_id: i32,
}

/// Reject payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct RejectLoanRequest {
    pub staff_id: i32,
    pub rejection_reason: String,
}

/// Loan request list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LoanRequestQuery {
    pub status: Option<LoanRequestStatus>,
    pub user_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn requested_days_spans_start_to_end() {
        let request = LoanRequest {
            id: 1,
            user_id: 1,
            asset_id: 1,
            request_date: Utc.with_ymd_and_hms(2024, 5, 30, 9, 0, 0).unwrap(),
            requested_start_date: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
            requested_end_date: Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap(),
            purpose: None,
            status: LoanRequestStatus::Pending,
            reviewed_by_staff_id: None,
            reviewed_at: None,
            rejection_reason: None,
        };
        assert_eq!(request.requested_days(), 14);
        assert!(request.is_pending());
    }
}
