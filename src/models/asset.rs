//! Asset (equipment item) model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{AssetStatus, PhysicalCondition};

/// Asset record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Asset {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub description: Option<String>,
    pub serial_number: Option<String>,
    pub status: AssetStatus,
    pub physical_condition: PhysicalCondition,
    /// Free-text condition note carried over from the legacy system
    pub item_condition: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = Option<f64>)]
    pub purchase_price: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    /// Whether the asset may be loaned right now.
    ///
    /// `Available` status is necessary but not sufficient: an asset in
    /// repair or retired is never loanable regardless of status.
    pub fn is_loanable(&self) -> bool {
        self.status == AssetStatus::Available
            && self.physical_condition != PhysicalCondition::InRepair
            && self.physical_condition != PhysicalCondition::Retired
    }
}

/// Asset with category name for list/detail responses
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssetDetails {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub category_name: String,
    pub description: Option<String>,
    pub serial_number: Option<String>,
    pub status: AssetStatus,
    pub physical_condition: PhysicalCondition,
    pub item_condition: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = Option<f64>)]
    pub purchase_price: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create asset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAsset {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub category_id: i32,
    pub description: Option<String>,
    #[validate(length(max = 100, message = "Serial number must be at most 100 characters"))]
    pub serial_number: Option<String>,
    pub item_condition: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = Option<f64>)]
    pub purchase_price: Option<Decimal>,
    pub notes: Option<String>,
}

/// Update asset request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAsset {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub description: Option<String>,
    pub serial_number: Option<String>,
    pub status: Option<AssetStatus>,
    pub physical_condition: Option<PhysicalCondition>,
    pub notes: Option<String>,
}

/// Asset list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AssetQuery {
    pub status: Option<AssetStatus>,
    pub category_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(status: AssetStatus, condition: PhysicalCondition) -> Asset {
        Asset {
            id: 1,
            name: "Oscilloscope".to_string(),
            category_id: 1,
            description: None,
            serial_number: Some("SN-001".to_string()),
            status,
            physical_condition: condition,
            item_condition: None,
            purchase_date: None,
            purchase_price: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn available_good_asset_is_loanable() {
        assert!(asset(AssetStatus::Available, PhysicalCondition::Good).is_loanable());
        assert!(asset(AssetStatus::Available, PhysicalCondition::Fair).is_loanable());
        assert!(asset(AssetStatus::Available, PhysicalCondition::Poor).is_loanable());
    }

    #[test]
    fn checked_out_or_reserved_asset_is_not_loanable() {
        assert!(!asset(AssetStatus::CheckedOut, PhysicalCondition::Good).is_loanable());
        assert!(!asset(AssetStatus::Reserved, PhysicalCondition::Good).is_loanable());
    }

    #[test]
    fn in_repair_or_retired_asset_is_not_loanable_even_when_available() {
        assert!(!asset(AssetStatus::Available, PhysicalCondition::InRepair).is_loanable());
        assert!(!asset(AssetStatus::Available, PhysicalCondition::Retired).is_loanable());
    }
}
