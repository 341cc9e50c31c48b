use super::setup_test_db;
use crate::{permissions, user_account, user_role};
use anyhow::Result;
use sea_orm::{EntityTrait, PaginatorTrait, TransactionTrait};

/// Rolled back transaction leaves no permissions or role behind
#[tokio::test]
async fn test_role_creation_rollback() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let perms = permissions::create(&txn).await?;
    user_role::create(&txn, "Temp", false, perms.id).await?;
    txn.rollback().await?;

    assert_eq!(permissions::Entity::find().count(&db).await?, 0);
    assert_eq!(user_role::Entity::find().count(&db).await?, 0);
    Ok(())
}

/// Deleting a role nulls the account's role reference
#[tokio::test]
async fn test_role_delete_sets_account_role_null() -> Result<()> {
    let db = setup_test_db().await?;
    let perms = permissions::create(&db).await?;
    let role = user_role::create(&db, "Guest", false, perms.id).await?;
    let acct = user_account::create(
        &db,
        user_account::NewUserAccount {
            username: "guest_1".into(),
            email: "guest@home.test".into(),
            first_name: "G".into(),
            middle_name: String::new(),
            last_name: "Uest".into(),
            gender: "unspecified".into(),
            phone_number: "5550100100".into(),
            password_hash: "x-hash".into(),
            user_role_id: Some(role.id),
        },
    )
    .await?;

    let txn = db.begin().await?;
    user_role::Entity::delete_by_id(role.id).exec(&txn).await?;
    permissions::Entity::delete_by_id(perms.id).exec(&txn).await?;
    txn.commit().await?;

    let reloaded = user_account::Entity::find_by_id(acct.id).one(&db).await?;
    assert_eq!(reloaded.and_then(|a| a.user_role_id), None);
    Ok(())
}
