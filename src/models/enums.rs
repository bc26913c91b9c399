//! Shared domain enums
//!
//! Every lifecycle enum is persisted as lowercase text, one canonical
//! representation in both the database and the JSON API.

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// User roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Staff,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Staff => "staff",
            UserRole::Admin => "admin",
        }
    }

    /// Whether this role may review requests and handle checkouts/returns
    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Staff | UserRole::Admin)
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(UserRole::Student),
            "staff" => Ok(UserRole::Staff),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// AssetStatus
// ---------------------------------------------------------------------------

/// Asset availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Available,
    CheckedOut,
    Reserved,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Available => "available",
            AssetStatus::CheckedOut => "checked_out",
            AssetStatus::Reserved => "reserved",
        }
    }
}

impl std::str::FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(AssetStatus::Available),
            "checked_out" => Ok(AssetStatus::CheckedOut),
            "reserved" => Ok(AssetStatus::Reserved),
            _ => Err(format!("Invalid asset status: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// PhysicalCondition
// ---------------------------------------------------------------------------

/// Physical condition of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalCondition {
    Good,
    Fair,
    Poor,
    InRepair,
    Retired,
}

impl PhysicalCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicalCondition::Good => "good",
            PhysicalCondition::Fair => "fair",
            PhysicalCondition::Poor => "poor",
            PhysicalCondition::InRepair => "in_repair",
            PhysicalCondition::Retired => "retired",
        }
    }
}

impl std::str::FromStr for PhysicalCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "good" => Ok(PhysicalCondition::Good),
            "fair" => Ok(PhysicalCondition::Fair),
            "poor" => Ok(PhysicalCondition::Poor),
            "in_repair" => Ok(PhysicalCondition::InRepair),
            "retired" => Ok(PhysicalCondition::Retired),
            _ => Err(format!("Invalid physical condition: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// LoanStatus
// ---------------------------------------------------------------------------

/// Loan lifecycle status (`Returned` is terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Returned,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Returned => "returned",
        }
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(LoanStatus::Active),
            "returned" => Ok(LoanStatus::Returned),
            _ => Err(format!("Invalid loan status: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// LoanRequestStatus
// ---------------------------------------------------------------------------

/// Loan request review status (`Approved` and `Rejected` are terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl LoanRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanRequestStatus::Pending => "pending",
            LoanRequestStatus::Approved => "approved",
            LoanRequestStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for LoanRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(LoanRequestStatus::Pending),
            "approved" => Ok(LoanRequestStatus::Approved),
            "rejected" => Ok(LoanRequestStatus::Rejected),
            _ => Err(format!("Invalid request status: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// ChangeType
// ---------------------------------------------------------------------------

/// Asset history entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Created,
    Updated,
    StatusChanged,
    ConditionChanged,
    Loaned,
    Returned,
    Deleted,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Created => "created",
            ChangeType::Updated => "updated",
            ChangeType::StatusChanged => "status_changed",
            ChangeType::ConditionChanged => "condition_changed",
            ChangeType::Loaned => "loaned",
            ChangeType::Returned => "returned",
            ChangeType::Deleted => "deleted",
        }
    }
}

impl std::str::FromStr for ChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(ChangeType::Created),
            "updated" => Ok(ChangeType::Updated),
            "status_changed" => Ok(ChangeType::StatusChanged),
            "condition_changed" => Ok(ChangeType::ConditionChanged),
            "loaned" => Ok(ChangeType::Loaned),
            "returned" => Ok(ChangeType::Returned),
            "deleted" => Ok(ChangeType::Deleted),
            _ => Err(format!("Invalid change type: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// NotificationType
// ---------------------------------------------------------------------------

/// Notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Overdue,
    DueSoon,
    Approved,
    Rejected,
    Info,
    Warning,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Overdue => "overdue",
            NotificationType::DueSoon => "due_soon",
            NotificationType::Approved => "approved",
            NotificationType::Rejected => "rejected",
            NotificationType::Info => "info",
            NotificationType::Warning => "warning",
        }
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overdue" => Ok(NotificationType::Overdue),
            "due_soon" | "duesoon" => Ok(NotificationType::DueSoon),
            "approved" => Ok(NotificationType::Approved),
            "rejected" => Ok(NotificationType::Rejected),
            "info" => Ok(NotificationType::Info),
            "warning" => Ok(NotificationType::Warning),
            _ => Err(format!("Invalid notification type: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// sqlx conversions (all enums travel as TEXT)
// ---------------------------------------------------------------------------

macro_rules! impl_text_enum {
    ($($name:ident),+ $(,)?) => {
        $(
            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }

            impl sqlx::Type<Postgres> for $name {
                fn type_info() -> sqlx::postgres::PgTypeInfo {
                    <String as sqlx::Type<Postgres>>::type_info()
                }

                fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                    <String as sqlx::Type<Postgres>>::compatible(ty)
                }
            }

            impl<'r> Decode<'r, Postgres> for $name {
                fn decode(
                    value: sqlx::postgres::PgValueRef<'r>,
                ) -> Result<Self, sqlx::error::BoxDynError> {
                    let s: String = Decode::<Postgres>::decode(value)?;
                    s.parse().map_err(|e: String| e.into())
                }
            }

            impl Encode<'_, Postgres> for $name {
                fn encode_by_ref(
                    &self,
                    buf: &mut sqlx::postgres::PgArgumentBuffer,
                ) -> sqlx::encode::IsNull {
                    <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
                }
            }
        )+
    };
}

impl_text_enum!(
    UserRole,
    AssetStatus,
    PhysicalCondition,
    LoanStatus,
    LoanRequestStatus,
    ChangeType,
    NotificationType,
);
