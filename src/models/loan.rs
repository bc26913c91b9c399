//! Loan model and the overdue arithmetic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::{LoanStatus, PhysicalCondition};

/// Loan record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub asset_id: i32,
    pub user_id: i32,
    /// Null when the loan was created by direct checkout without a request
    pub approved_by_staff_id: Option<i32>,
    pub check_out_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub return_condition: Option<PhysicalCondition>,
    pub return_notes: Option<String>,
    pub overdue_days: i32,
    pub received_by_staff_id: Option<i32>,
    pub status: LoanStatus,
    pub last_reminder_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Loan {
    /// An active loan whose due date has passed
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == LoanStatus::Active && now > self.due_date
    }

    /// Whole days until the due date, negative once overdue by a full day
    pub fn days_until_due(&self, now: DateTime<Utc>) -> i64 {
        (self.due_date - now).num_days()
    }

    /// Due within the next two days and not yet overdue
    pub fn is_due_soon(&self, now: DateTime<Utc>) -> bool {
        if self.status != LoanStatus::Active || self.is_overdue(now) {
            return false;
        }
        let days = self.days_until_due(now);
        (0..=2).contains(&days)
    }
}

/// Whole days a return is late, never negative.
pub fn overdue_days(due_date: DateTime<Utc>, return_date: DateTime<Utc>) -> i32 {
    (return_date - due_date).num_days().max(0) as i32
}

/// Internal row structure for loan list queries with joined display fields
#[derive(Debug, Clone, FromRow)]
pub struct LoanDetailsRow {
    pub id: i32,
    pub asset_id: i32,
    pub asset_name: String,
    pub serial_number: Option<String>,
    pub user_id: i32,
    pub user_name: String,
    pub user_university_id: String,
    pub approved_by_staff_id: Option<i32>,
    pub approved_by_staff_name: Option<String>,
    pub check_out_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub return_condition: Option<PhysicalCondition>,
    pub return_notes: Option<String>,
    pub overdue_days: i32,
    pub received_by_staff_name: Option<String>,
    pub status: LoanStatus,
}

impl LoanDetailsRow {
    pub fn into_details(self, now: DateTime<Utc>) -> LoanDetails {
        let is_overdue = self.status == LoanStatus::Active && now > self.due_date;
        let days_until_due = (self.due_date - now).num_days();
        LoanDetails {
            id: self.id,
            asset_id: self.asset_id,
            asset_name: self.asset_name,
            serial_number: self.serial_number,
            user_id: self.user_id,
            user_name: self.user_name,
            user_university_id: self.user_university_id,
            approved_by_staff_id: self.approved_by_staff_id,
            approved_by_staff_name: self.approved_by_staff_name,
            check_out_date: self.check_out_date,
            due_date: self.due_date,
            return_date: self.return_date,
            return_condition: self.return_condition,
            return_notes: self.return_notes,
            overdue_days: self.overdue_days,
            received_by_staff_name: self.received_by_staff_name,
            status: self.status,
            is_overdue,
            days_until_due,
        }
    }
}

/// Loan with borrower, asset and reviewer display fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanDetails {
    pub id: i32,
    pub asset_id: i32,
    pub asset_name: String,
    pub serial_number: Option<String>,
    pub user_id: i32,
    pub user_name: String,
    pub user_university_id: String,
    pub approved_by_staff_id: Option<i32>,
    pub approved_by_staff_name: Option<String>,
    pub check_out_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub return_condition: Option<PhysicalCondition>,
    pub return_notes: Option<String>,
    pub overdue_days: i32,
    pub received_by_staff_name: Option<String>,
    pub status: LoanStatus,
    pub is_overdue: bool,
    pub days_until_due: i64,
}

/// Create loan request (direct staff checkout)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLoan {
    pub asset_id: i32,
    pub user_id: i32,
    pub approved_by_staff_id: Option<i32>,
    pub due_date: DateTime<Utc>,
}

/// Return loan request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReturnLoan {
    pub return_condition: Option<PhysicalCondition>,
    pub return_notes: Option<String>,
    pub received_by_staff_id: Option<i32>,
}

/// Loan list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LoanQuery {
    pub status: Option<LoanStatus>,
    pub user_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn loan(due: DateTime<Utc>, status: LoanStatus) -> Loan {
        Loan {
            id: 1,
            asset_id: 1,
            user_id: 2,
            approved_by_staff_id: Some(3),
            check_out_date: due - chrono::Duration::days(14),
            due_date: due,
            return_date: None,
            return_condition: None,
            return_notes: None,
            overdue_days: 0,
            received_by_staff_id: None,
            status,
            last_reminder_sent_at: None,
            created_at: due - chrono::Duration::days(14),
        }
    }

    #[test]
    fn overdue_days_counts_whole_late_days() {
        assert_eq!(overdue_days(date(2024, 1, 10), date(2024, 1, 15)), 5);
    }

    #[test]
    fn overdue_days_is_zero_for_same_day_return() {
        assert_eq!(overdue_days(date(2024, 1, 10), date(2024, 1, 10)), 0);
    }

    #[test]
    fn overdue_days_is_never_negative() {
        assert_eq!(overdue_days(date(2024, 1, 10), date(2024, 1, 5)), 0);
    }

    #[test]
    fn active_loan_past_due_is_overdue() {
        let l = loan(date(2024, 1, 10), LoanStatus::Active);
        assert!(l.is_overdue(date(2024, 1, 11)));
        assert!(!l.is_overdue(date(2024, 1, 9)));
    }

    #[test]
    fn returned_loan_is_never_overdue() {
        let l = loan(date(2024, 1, 10), LoanStatus::Returned);
        assert!(!l.is_overdue(date(2024, 2, 1)));
    }

    #[test]
    fn days_until_due_goes_negative_when_overdue() {
        let l = loan(date(2024, 1, 10), LoanStatus::Active);
        assert_eq!(l.days_until_due(date(2024, 1, 7)), 3);
        assert_eq!(l.days_until_due(date(2024, 1, 13)), -3);
    }

    #[test]
    fn first_overdue_day_reports_zero_days_until_due() {
        // Truncating day arithmetic: within 24h of the due date the count
        // stays at 0 even though the loan is already overdue.
        let l = loan(date(2024, 1, 10), LoanStatus::Active);
        let just_past = Utc.with_ymd_and_hms(2024, 1, 10, 18, 0, 0).unwrap();
        assert!(l.is_overdue(just_past));
        assert_eq!(l.days_until_due(just_past), 0);
        assert!(!l.is_due_soon(just_past));
    }

    #[test]
    fn due_soon_window_is_zero_to_two_days() {
        let l = loan(date(2024, 1, 10), LoanStatus::Active);
        assert!(l.is_due_soon(date(2024, 1, 8)));
        assert!(l.is_due_soon(date(2024, 1, 10)));
        assert!(!l.is_due_soon(date(2024, 1, 7)));
        assert!(!l.is_due_soon(date(2024, 1, 11)));
    }
}
