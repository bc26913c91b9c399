//! Assets repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::asset::{Asset, AssetDetails, AssetQuery, CreateAsset, UpdateAsset},
    models::enums::{AssetStatus, PhysicalCondition},
};

#[derive(Clone)]
pub struct AssetsRepository {
    pool: Pool<Postgres>,
}

impl AssetsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List assets with their category name, optionally filtered
    pub async fn list(&self, query: &AssetQuery) -> AppResult<Vec<AssetDetails>> {
        let rows = sqlx::query_as::<_, AssetDetails>(
            r#"
            SELECT a.*, c.name AS category_name
            FROM assets a
            JOIN categories c ON a.category_id = c.id
            WHERE ($1::text IS NULL OR a.status = $1)
              AND ($2::int4 IS NULL OR a.category_id = $2)
            ORDER BY a.name
            "#,
        )
        .bind(query.status)
        .bind(query.category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get asset with category name by ID
    pub async fn get_details(&self, id: i32) -> AppResult<AssetDetails> {
        sqlx::query_as::<_, AssetDetails>(
            r#"
            SELECT a.*, c.name AS category_name
            FROM assets a
            JOIN categories c ON a.category_id = c.id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset with ID {} not found", id)))
    }

    /// Get asset row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset with ID {} not found", id)))
    }

    /// Create an asset; new assets start available and in good condition
    pub async fn create(&self, data: &CreateAsset) -> AppResult<Asset> {
        let now = Utc::now();
        sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                name, category_id, description, serial_number, status,
                physical_condition, item_condition, purchase_date,
                purchase_price, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.category_id)
        .bind(&data.description)
        .bind(&data.serial_number)
        .bind(AssetStatus::Available)
        .bind(PhysicalCondition::Good)
        .bind(&data.item_condition)
        .bind(data.purchase_date)
        .bind(data.purchase_price)
        .bind(&data.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Serial number already exists"))
    }

    /// Update an asset (partial)
    pub async fn update(&self, id: i32, data: &UpdateAsset) -> AppResult<Asset> {
        let now = Utc::now();
        sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets SET
                name = COALESCE($2, name),
                category_id = COALESCE($3, category_id),
                description = COALESCE($4, description),
                serial_number = COALESCE($5, serial_number),
                status = COALESCE($6, status),
                physical_condition = COALESCE($7, physical_condition),
                notes = COALESCE($8, notes),
                updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.category_id)
        .bind(&data.description)
        .bind(&data.serial_number)
        .bind(data.status)
        .bind(data.physical_condition)
        .bind(&data.notes)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Serial number already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Asset with ID {} not found", id)))
    }

    /// Delete an asset; restricted while loans or requests reference it
    pub async fn delete(&self, id: i32) -> AppResult<Asset> {
        let asset = self.get_by_id(id).await?;

        let referenced: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM loans WHERE asset_id = $1)
                OR EXISTS(SELECT 1 FROM loan_requests WHERE asset_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if referenced {
            return Err(AppError::Conflict(format!(
                "Asset '{}' has loan records and cannot be deleted",
                asset.name
            )));
        }

        sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(asset)
    }
}
