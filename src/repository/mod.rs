//! Repository layer for database operations

pub mod asset_history;
pub mod assets;
pub mod categories;
pub mod loan_requests;
pub mod loans;
pub mod notifications;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub categories: categories::CategoriesRepository,
    pub assets: assets::AssetsRepository,
    pub users: users::UsersRepository,
    pub loan_requests: loan_requests::LoanRequestsRepository,
    pub loans: loans::LoansRepository,
    pub history: asset_history::AssetHistoryRepository,
    pub notifications: notifications::NotificationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            categories: categories::CategoriesRepository::new(pool.clone()),
            assets: assets::AssetsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            loan_requests: loan_requests::LoanRequestsRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            history: asset_history::AssetHistoryRepository::new(pool.clone()),
            notifications: notifications::NotificationsRepository::new(pool.clone()),
            pool,
        }
    }
}
