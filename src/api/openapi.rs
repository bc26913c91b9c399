//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    asset_history, assets, auth, categories, health, loan_requests, loans, notifications, users,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "InventoryMS API",
        version = "1.0.0",
        description = "University Equipment Loan Tracking REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::register,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::deactivate_user,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::create_asset,
        assets::update_asset,
        assets::delete_asset,
        assets::get_asset_history,
        // Loan requests
        loan_requests::list_loan_requests,
        loan_requests::get_loan_request,
        loan_requests::create_loan_request,
        loan_requests::approve_loan_request,
        loan_requests::reject_loan_request,
        // Loans
        loans::list_loans,
        loans::list_overdue_loans,
        loans::get_loan,
        loans::create_loan,
        loans::return_loan,
        // Asset history
        asset_history::list_history,
        asset_history::get_history_entry,
        asset_history::create_history_entry,
        asset_history::log_status_change,
        // Notifications
        notifications::list_notifications,
        notifications::get_notification,
        notifications::create_notification,
        notifications::mark_read,
        notifications::mark_all_read,
        notifications::delete_notification,
        notifications::send_overdue_reminders,
    ),
    components(
        schemas(
            // Auth
            auth::LoginResponse,
            crate::models::user::Login,
            crate::models::user::Register,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Assets
            crate::models::asset::Asset,
            crate::models::asset::AssetDetails,
            crate::models::asset::CreateAsset,
            crate::models::asset::UpdateAsset,
            // Loan requests
            crate::models::loan_request::LoanRequest,
            crate::models::loan_request::LoanRequestDetails,
            crate::models::loan_request::CreateLoanRequest,
            crate::models::loan_request::ApproveLoanRequest,
            crate::models::loan_request::RejectLoanRequest,
            loan_requests::ApprovalResponse,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::LoanDetails,
            crate::models::loan::CreateLoan,
            crate::models::loan::ReturnLoan,
            // Asset history
            crate::models::asset_history::AssetHistory,
            crate::models::asset_history::AssetHistoryDetails,
            crate::models::asset_history::CreateAssetHistory,
            crate::models::asset_history::LogStatusChange,
            // Notifications
            crate::models::notification::Notification,
            crate::models::notification::CreateNotification,
            notifications::CountResponse,
            // Enums
            crate::models::enums::UserRole,
            crate::models::enums::AssetStatus,
            crate::models::enums::PhysicalCondition,
            crate::models::enums::LoanStatus,
            crate::models::enums::LoanRequestStatus,
            crate::models::enums::ChangeType,
            crate::models::enums::NotificationType,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management"),
        (name = "categories", description = "Equipment categories"),
        (name = "assets", description = "Equipment asset management"),
        (name = "loan-requests", description = "Loan request workflow"),
        (name = "loans", description = "Loan lifecycle"),
        (name = "asset-history", description = "Asset audit history"),
        (name = "notifications", description = "User notifications")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
