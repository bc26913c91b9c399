//! Loan request workflow endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        loan::Loan,
        loan_request::{
            ApproveLoanRequest, CreateLoanRequest, LoanRequest, LoanRequestDetails,
            LoanRequestQuery, RejectLoanRequest,
        },
    },
    AppState,
};

use super::AuthenticatedUser;

/// Approval response carrying both sides of the transition
#[derive(Serialize, ToSchema)]
pub struct ApprovalResponse {
    pub request: LoanRequest,
    pub loan: Loan,
}

/// List loan requests
#[utoipa::path(
    get,
    path = "/loanrequests",
    tag = "loan-requests",
    security(("bearer_auth" = [])),
    params(LoanRequestQuery),
    responses(
        (status = 200, description = "Requests matching the filters", body = Vec<LoanRequestDetails>)
    )
)]
pub async fn list_loan_requests(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(mut query): Query<LoanRequestQuery>,
) -> AppResult<Json<Vec<LoanRequestDetails>>> {
    // Students only see their own requests
    if !claims.role.is_staff() {
        query.user_id = Some(claims.user_id);
    }

    let requests = state.services.loan_requests.list(query).await?;
    Ok(Json(requests))
}

/// Get a loan request by ID
#[utoipa::path(
    get,
    path = "/loanrequests/{id}",
    tag = "loan-requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Loan request ID")
    ),
    responses(
        (status = 200, description = "Request found", body = LoanRequestDetails),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_loan_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<LoanRequestDetails>> {
    let request = state.services.loan_requests.get(id).await?;
    if request.user_id != claims.user_id {
        claims.require_staff()?;
    }
    Ok(Json(request))
}

/// File a new loan request
#[utoipa::path(
    post,
    path = "/loanrequests",
    tag = "loan-requests",
    security(("bearer_auth" = [])),
    request_body = CreateLoanRequest,
    responses(
        (status = 201, description = "Request filed", body = LoanRequest),
        (status = 400, description = "Asset not loanable or user inactive"),
        (status = 404, description = "Asset or user not found")
    )
)]
pub async fn create_loan_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(mut payload): Json<CreateLoanRequest>,
) -> AppResult<(StatusCode, Json<LoanRequest>)> {
    payload.validate()?;

    // Students can only request for themselves
    if !claims.role.is_staff() {
        payload.user_id = claims.user_id;
    }

    let request = state.services.loan_requests.create(payload).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// Approve a pending loan request
///
/// Creates the loan and checks out the asset in one transaction.
#[utoipa::path(
    put,
    path = "/loanrequests/{id}/approve",
    tag = "loan-requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Loan request ID")
    ),
    request_body = ApproveLoanRequest,
    responses(
        (status = 200, description = "Request approved, loan created", body = ApprovalResponse),
        (status = 400, description = "Request already reviewed or asset no longer available"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn approve_loan_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<ApproveLoanRequest>,
) -> AppResult<Json<ApprovalResponse>> {
    claims.require_staff()?;

    let (request, loan) = state
        .services
        .loan_requests
        .approve(id, payload.staff_id)
        .await?;
    Ok(Json(ApprovalResponse { request, loan }))
}

/// Reject a pending loan request
#[utoipa::path(
    put,
    path = "/loanrequests/{id}/reject",
    tag = "loan-requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Loan request ID")
    ),
    request_body = RejectLoanRequest,
    responses(
        (status = 200, description = "Request rejected", body = LoanRequest),
        (status = 400, description = "Request already reviewed or reason missing"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn reject_loan_request(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<RejectLoanRequest>,
) -> AppResult<Json<LoanRequest>> {
    claims.require_staff()?;

    let request = state
        .services
        .loan_requests
        .reject(id, payload.staff_id, &payload.rejection_reason)
        .await?;
    Ok(Json(request))
}
