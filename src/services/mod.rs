//! Business logic services

pub mod audit;
pub mod auth;
pub mod assets;
pub mod loan_requests;
pub mod loans;
pub mod notifications;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub assets: assets::AssetsService,
    pub loan_requests: loan_requests::LoanRequestsService,
    pub loans: loans::LoansService,
    pub notifications: notifications::NotificationsService,
    pub audit: audit::AuditService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        let audit = audit::AuditService::new(repository.clone());
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            assets: assets::AssetsService::new(repository.clone(), audit.clone()),
            loan_requests: loan_requests::LoanRequestsService::new(
                repository.clone(),
                audit.clone(),
            ),
            loans: loans::LoansService::new(repository.clone(), audit.clone()),
            notifications: notifications::NotificationsService::new(repository),
            audit,
        }
    }
}
