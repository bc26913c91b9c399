//! Loan lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::loan::{CreateLoan, Loan, LoanDetails, LoanQuery, ReturnLoan},
    AppState,
};

use super::AuthenticatedUser;

/// List loans
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(LoanQuery),
    responses(
        (status = 200, description = "Loans matching the filters", body = Vec<LoanDetails>)
    )
)]
pub async fn list_loans(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(mut query): Query<LoanQuery>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    // Students only see their own loans
    if !claims.role.is_staff() {
        query.user_id = Some(claims.user_id);
    }

    let loans = state.services.loans.list(query).await?;
    Ok(Json(loans))
}

/// List active loans past their due date
#[utoipa::path(
    get,
    path = "/loans/overdue",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Overdue loans", body = Vec<LoanDetails>),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn list_overdue_loans(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<LoanDetails>>> {
    claims.require_staff()?;

    let loans = state.services.loans.list_overdue().await?;
    Ok(Json(loans))
}

/// Get a loan by ID
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Loan found", body = LoanDetails),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<LoanDetails>> {
    let loan = state.services.loans.get(id).await?;
    if loan.user_id != claims.user_id {
        claims.require_staff()?;
    }
    Ok(Json(loan))
}

/// Check out an asset directly, bypassing the request workflow
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 400, description = "Asset not available or user inactive"),
        (status = 404, description = "Asset or user not found")
    )
)]
pub async fn create_loan(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(mut payload): Json<CreateLoan>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    claims.require_staff()?;

    // Record the acting staff member when the client omits one
    if payload.approved_by_staff_id.is_none() {
        payload.approved_by_staff_id = Some(claims.user_id);
    }

    let loan = state.services.loans.create(payload).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Return an active loan
#[utoipa::path(
    put,
    path = "/loans/{id}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    request_body = ReturnLoan,
    responses(
        (status = 200, description = "Loan returned", body = Loan),
        (status = 400, description = "Loan is not active"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn return_loan(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(mut payload): Json<ReturnLoan>,
) -> AppResult<Json<Loan>> {
    claims.require_staff()?;

    if payload.received_by_staff_id.is_none() {
        payload.received_by_staff_id = Some(claims.user_id);
    }

    let loan = state.services.loans.return_loan(id, payload).await?;
    Ok(Json(loan))
}
