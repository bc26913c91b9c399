//! Asset history (audit log) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        asset_history::{
            AssetHistory, AssetHistoryDetails, AssetHistoryQuery, CreateAssetHistory,
            LogStatusChange,
        },
        enums::ChangeType,
    },
    AppState,
};

use super::AuthenticatedUser;

/// List history entries, newest first
#[utoipa::path(
    get,
    path = "/assethistory",
    tag = "asset-history",
    security(("bearer_auth" = [])),
    params(AssetHistoryQuery),
    responses(
        (status = 200, description = "History entries matching the filters", body = Vec<AssetHistoryDetails>),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn list_history(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AssetHistoryQuery>,
) -> AppResult<Json<Vec<AssetHistoryDetails>>> {
    claims.require_staff()?;

    let entries = state.services.audit.list(query).await?;
    Ok(Json(entries))
}

/// Get a history entry by ID
#[utoipa::path(
    get,
    path = "/assethistory/{id}",
    tag = "asset-history",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "History entry ID")
    ),
    responses(
        (status = 200, description = "Entry found", body = AssetHistoryDetails),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn get_history_entry(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AssetHistoryDetails>> {
    claims.require_staff()?;

    let entry = state.services.audit.get(id).await?;
    Ok(Json(entry))
}

/// Append a manual history entry
#[utoipa::path(
    post,
    path = "/assethistory",
    tag = "asset-history",
    security(("bearer_auth" = [])),
    request_body = CreateAssetHistory,
    responses(
        (status = 201, description = "Entry logged", body = AssetHistory),
        (status = 404, description = "Asset or user not found")
    )
)]
pub async fn create_history_entry(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateAssetHistory>,
) -> AppResult<(StatusCode, Json<AssetHistory>)> {
    claims.require_staff()?;

    let entry = state.services.audit.log(&payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Log a manual status change entry
#[utoipa::path(
    post,
    path = "/assethistory/log-status-change",
    tag = "asset-history",
    security(("bearer_auth" = [])),
    request_body = LogStatusChange,
    responses(
        (status = 201, description = "Entry logged", body = AssetHistory),
        (status = 404, description = "Asset or user not found")
    )
)]
pub async fn log_status_change(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<LogStatusChange>,
) -> AppResult<(StatusCode, Json<AssetHistory>)> {
    claims.require_staff()?;

    let entry = CreateAssetHistory {
        asset_id: payload.asset_id,
        changed_by: payload.changed_by,
        change_type: ChangeType::StatusChanged,
        old_value: Some(payload.old_status),
        new_value: Some(payload.new_status),
        notes: payload.notes,
    };
    let logged = state.services.audit.log(&entry).await?;
    Ok((StatusCode::CREATED, Json(logged)))
}
