//! Domain models and request/response types

pub mod asset;
pub mod asset_history;
pub mod category;
pub mod enums;
pub mod loan;
pub mod loan_request;
pub mod notification;
pub mod user;
