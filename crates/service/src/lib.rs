//! Service layer providing the household-management operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Reports every failure through `ServiceError` or `AuthError`.

pub mod errors;
pub mod validators;
pub mod filters;
pub mod user_account_service;
pub mod user_role_service;
pub mod notification_service;
pub mod auth;
pub mod seeder;
#[cfg(test)]
pub mod test_support;
