//! Asset history repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::asset_history::{
        AssetHistory, AssetHistoryDetails, AssetHistoryQuery, CreateAssetHistory,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT ah.id, ah.asset_id, a.name AS asset_name,
           ah.changed_by, u.first_name || ' ' || u.last_name AS changed_by_name,
           ah.change_type, ah.old_value, ah.new_value, ah.notes, ah.changed_at
    FROM asset_history ah
    JOIN assets a ON ah.asset_id = a.id
    JOIN users u ON ah.changed_by = u.id
"#;

#[derive(Clone)]
pub struct AssetHistoryRepository {
    pool: Pool<Postgres>,
}

impl AssetHistoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List history entries, newest first, optionally filtered
    pub async fn list(&self, query: &AssetHistoryQuery) -> AppResult<Vec<AssetHistoryDetails>> {
        let sql = format!(
            r#"{}
            WHERE ($1::int4 IS NULL OR ah.asset_id = $1)
              AND ($2::text IS NULL OR ah.change_type = $2)
            ORDER BY ah.changed_at DESC
            "#,
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, AssetHistoryDetails>(&sql)
            .bind(query.asset_id)
            .bind(query.change_type)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a single entry by ID
    pub async fn get_details(&self, id: i32) -> AppResult<AssetHistoryDetails> {
        let sql = format!("{} WHERE ah.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, AssetHistoryDetails>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Asset history entry with ID {} not found", id))
            })
    }

    /// List history for one asset, newest first
    pub async fn list_by_asset(&self, asset_id: i32) -> AppResult<Vec<AssetHistoryDetails>> {
        let sql = format!(
            "{} WHERE ah.asset_id = $1 ORDER BY ah.changed_at DESC",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, AssetHistoryDetails>(&sql)
            .bind(asset_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Append a history entry
    pub async fn create(
        &self,
        data: &CreateAssetHistory,
        at: DateTime<Utc>,
    ) -> AppResult<AssetHistory> {
        let row = sqlx::query_as::<_, AssetHistory>(
            r#"
            INSERT INTO asset_history (
                asset_id, changed_by, change_type, old_value, new_value, notes, changed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.asset_id)
        .bind(data.changed_by)
        .bind(data.change_type)
        .bind(&data.old_value)
        .bind(&data.new_value)
        .bind(&data.notes)
        .bind(at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
