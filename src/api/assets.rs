//! Asset (equipment item) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        asset::{Asset, AssetDetails, AssetQuery, CreateAsset, UpdateAsset},
        asset_history::AssetHistoryDetails,
    },
    AppState,
};

use super::AuthenticatedUser;

/// List assets with optional status and category filters
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(AssetQuery),
    responses(
        (status = 200, description = "Assets matching the filters", body = Vec<AssetDetails>)
    )
)]
pub async fn list_assets(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<AssetQuery>,
) -> AppResult<Json<Vec<AssetDetails>>> {
    let assets = state.services.assets.list_assets(query).await?;
    Ok(Json(assets))
}

/// Get an asset by ID
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Asset ID")
    ),
    responses(
        (status = 200, description = "Asset found", body = AssetDetails),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn get_asset(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AssetDetails>> {
    let asset = state.services.assets.get_asset(id).await?;
    Ok(Json(asset))
}

/// Create an asset
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    security(("bearer_auth" = [])),
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Invalid category"),
        (status = 409, description = "Serial number already exists")
    )
)]
pub async fn create_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    claims.require_staff()?;
    payload.validate()?;

    let asset = state
        .services
        .assets
        .create_asset(payload, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Update an asset
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Asset ID")
    ),
    request_body = UpdateAsset,
    responses(
        (status = 200, description = "Asset updated", body = Asset),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn update_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAsset>,
) -> AppResult<Json<Asset>> {
    claims.require_staff()?;
    payload.validate()?;

    let asset = state
        .services
        .assets
        .update_asset(id, payload, claims.user_id)
        .await?;
    Ok(Json(asset))
}

/// Delete an asset
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Asset ID")
    ),
    responses(
        (status = 200, description = "Asset deleted", body = Asset),
        (status = 404, description = "Asset not found"),
        (status = 409, description = "Loans or requests still reference this asset")
    )
)]
pub async fn delete_asset(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Asset>> {
    claims.require_staff()?;

    let asset = state.services.assets.delete_asset(id).await?;
    Ok(Json(asset))
}

/// Get the full change history of an asset
#[utoipa::path(
    get,
    path = "/assets/{id}/history",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Asset ID")
    ),
    responses(
        (status = 200, description = "History entries, newest first", body = Vec<AssetHistoryDetails>),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn get_asset_history(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<AssetHistoryDetails>>> {
    // 404 for unknown assets rather than an empty list
    state.services.assets.get_asset(id).await?;

    let history = state.services.audit.list_by_asset(id).await?;
    Ok(Json(history))
}
