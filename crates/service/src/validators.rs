//! Field-level checks for incoming payloads.
//!
//! Every check runs; all failures come back joined in a single `Validation` error.

use models::errors::ModelError;
use models::{banned_account, user_account, user_role};

use crate::errors::ServiceError;
use crate::notification_service::GenerateNotificationInput;
use crate::user_account_service::{CreateUserAccountInput, UpdateUserAccountInput};

pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 128;

pub fn validate_password(password: &str) -> Result<(), ModelError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN {
        return Err(ModelError::Validation(format!("password too short (>={PASSWORD_MIN})")));
    }
    if len > PASSWORD_MAX {
        return Err(ModelError::Validation(format!("password too long (<={PASSWORD_MAX})")));
    }
    Ok(())
}

fn collect(checks: Vec<Result<(), ModelError>>) -> Result<(), ServiceError> {
    let failures: Vec<String> = checks
        .into_iter()
        .filter_map(|r| match r {
            Err(ModelError::Validation(m)) => Some(m),
            Err(other) => Some(other.to_string()),
            Ok(()) => None,
        })
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(failures.join("; ")))
    }
}

fn profile_checks(
    username: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
    gender: &str,
    phone_number: &str,
) -> Vec<Result<(), ModelError>> {
    vec![
        user_account::validate_username(username),
        user_account::validate_email(email),
        user_account::validate_required("first_name", first_name),
        user_account::validate_required("last_name", last_name),
        user_account::validate_required("gender", gender),
        user_account::validate_phone_number(phone_number),
    ]
}

pub fn validate_create_user_account(input: &CreateUserAccountInput) -> Result<(), ServiceError> {
    let mut checks = profile_checks(
        &input.username,
        &input.email,
        &input.first_name,
        &input.last_name,
        &input.gender,
        &input.phone_number,
    );
    checks.push(validate_password(&input.password));
    collect(checks)
}

pub fn validate_update_user_account(input: &UpdateUserAccountInput) -> Result<(), ServiceError> {
    let mut checks = vec![user_account::validate_required("id", &input.id)];
    checks.extend(profile_checks(
        &input.username,
        &input.email,
        &input.first_name,
        &input.last_name,
        &input.gender,
        &input.phone_number,
    ));
    collect(checks)
}

pub fn validate_user_role(role_name: &str) -> Result<(), ServiceError> {
    collect(vec![user_role::validate_role_name(role_name)])
}

pub fn validate_ban(reason: &str) -> Result<(), ServiceError> {
    collect(vec![banned_account::validate_reason(reason)])
}

pub fn validate_notification(input: &GenerateNotificationInput) -> Result<(), ServiceError> {
    collect(vec![
        user_account::validate_required("title", &input.title),
        user_account::validate_required("message", &input.message),
        user_account::validate_required("type", &input.notification_type),
        user_account::validate_required("user_account_id", &input.user_account_id),
    ])
}
