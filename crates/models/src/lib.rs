pub mod errors;
pub mod db;
pub mod permissions;
pub mod user_role;
pub mod user_account;
pub mod banned_account;
pub mod notification;

#[cfg(test)]
mod tests;
