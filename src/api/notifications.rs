//! Notification endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppResult,
    models::notification::{CreateNotification, Notification, NotificationQuery},
    AppState,
};

use super::AuthenticatedUser;

/// Bulk mark-read query parameters
#[derive(Deserialize, IntoParams)]
pub struct MarkAllReadQuery {
    #[serde(alias = "userId")]
    pub user_id: i32,
}

/// Count of affected notifications
#[derive(Serialize, ToSchema)]
pub struct CountResponse {
    pub count: u64,
}

/// List notifications
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(NotificationQuery),
    responses(
        (status = 200, description = "Notifications matching the filters", body = Vec<Notification>)
    )
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(mut query): Query<NotificationQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    // Students only see their own notifications
    if !claims.role.is_staff() {
        query.user_id = Some(claims.user_id);
    }

    let notifications = state.services.notifications.list(query).await?;
    Ok(Json(notifications))
}

/// Get a notification by ID
#[utoipa::path(
    get,
    path = "/notifications/{id}",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification found", body = Notification),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn get_notification(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Notification>> {
    let notification = state.services.notifications.get(id).await?;
    if notification.user_id != claims.user_id {
        claims.require_staff()?;
    }
    Ok(Json(notification))
}

/// Create a notification
#[utoipa::path(
    post,
    path = "/notifications",
    tag = "notifications",
    security(("bearer_auth" = [])),
    request_body = CreateNotification,
    responses(
        (status = 201, description = "Notification created", body = Notification),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_notification(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    claims.require_staff()?;
    payload.validate()?;

    let notification = state.services.notifications.create(payload).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// Mark a notification as read
#[utoipa::path(
    put,
    path = "/notifications/{id}/mark-read",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked read", body = Notification),
        (status = 400, description = "Already read"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Notification>> {
    let notification = state.services.notifications.get(id).await?;
    if notification.user_id != claims.user_id {
        claims.require_staff()?;
    }

    let notification = state.services.notifications.mark_read(id).await?;
    Ok(Json(notification))
}

/// Mark all of a user's notifications as read
#[utoipa::path(
    put,
    path = "/notifications/mark-all-read",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(MarkAllReadQuery),
    responses(
        (status = 200, description = "Notifications marked read", body = CountResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<MarkAllReadQuery>,
) -> AppResult<Json<CountResponse>> {
    if query.user_id != claims.user_id {
        claims.require_staff()?;
    }

    let count = state
        .services
        .notifications
        .mark_all_read(query.user_id)
        .await?;
    Ok(Json(CountResponse { count }))
}

/// Delete a notification
#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Notification ID")
    ),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    let notification = state.services.notifications.get(id).await?;
    if notification.user_id != claims.user_id {
        claims.require_staff()?;
    }

    state.services.notifications.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Sweep overdue loans and notify the borrowers
///
/// Idempotent within a day: loans reminded in the last 24 hours are skipped.
#[utoipa::path(
    post,
    path = "/notifications/send-overdue-reminders",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reminders sent", body = CountResponse),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn send_overdue_reminders(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<CountResponse>> {
    claims.require_staff()?;

    let count = state.services.notifications.send_overdue_reminders().await?;
    Ok(Json(CountResponse { count }))
}
