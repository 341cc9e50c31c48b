use super::setup_test_db;
use crate::errors::ModelError;
use crate::user_account::{NewUserAccount, UserStatus};
use crate::{banned_account, notification, permissions, user_account, user_role};
use anyhow::Result;
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter};

fn new_account(username: &str, role: Option<i32>) -> NewUserAccount {
    NewUserAccount {
        username: username.to_string(),
        email: format!("{username}@home.test"),
        first_name: "Test".into(),
        middle_name: String::new(),
        last_name: "User".into(),
        gender: "unspecified".into(),
        phone_number: "+1 555 0100".into(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
        user_role_id: role,
    }
}

/// Test role and permissions CRUD
#[tokio::test]
async fn test_user_role_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let perms = permissions::create(&db).await?;
    let role = user_role::create(&db, "  Parent ", false, perms.id).await?;
    assert_eq!(role.role_name, "Parent");
    assert_eq!(role.permissions_id, perms.id);

    let found = user_role::Entity::find_by_id(role.id).one(&db).await?;
    assert!(found.is_some());
    let linked = role.find_related(permissions::Entity).one(&db).await?;
    assert_eq!(linked.map(|p| p.id), Some(perms.id));

    // Role pointing at a missing permissions row
    let err = user_role::create(&db, "Ghost", false, 9999).await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound(_) | ModelError::Db(_)));
    Ok(())
}

/// Test user account CRUD operations
#[tokio::test]
async fn test_user_account_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let perms = permissions::create(&db).await?;
    let role = user_role::create(&db, "Child", false, perms.id).await?;

    let created = user_account::create(&db, new_account("kid_one", Some(role.id))).await?;
    assert_eq!(created.status, UserStatus::Active);
    assert_eq!(created.count_bans, 0);
    assert_eq!(created.id.len(), 36);

    let by_name = user_account::find_by_username(&db, "kid_one").await?;
    assert_eq!(by_name.map(|a| a.id), Some(created.id.clone()));

    let related_role = created.find_related(user_role::Entity).one(&db).await?;
    assert_eq!(related_role.map(|r| r.role_name), Some("Child".to_string()));

    // Duplicate username
    let dup = user_account::create(&db, new_account("kid_one", None)).await.unwrap_err();
    assert!(matches!(dup, ModelError::Conflict(_)));

    // Soft delete keeps the row
    let deleted = user_account::set_status(&db, &created.id, UserStatus::Deleted).await?;
    assert_eq!(deleted.status, UserStatus::Deleted);
    let still_there = user_account::Entity::find_by_id(created.id.clone()).one(&db).await?;
    assert!(still_there.is_some());

    let missing = user_account::set_status(&db, "nope", UserStatus::Active).await.unwrap_err();
    assert!(matches!(missing, ModelError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn test_password_hash_not_serialized() -> Result<()> {
    let db = setup_test_db().await?;
    let created = user_account::create(&db, new_account("hidden_pw", None)).await?;
    let json = serde_json::to_value(&created)?;
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["status"], "active");
    Ok(())
}

/// Bans and notifications hang off an account
#[tokio::test]
async fn test_ban_and_notification_rows() -> Result<()> {
    let db = setup_test_db().await?;
    let acct = user_account::create(&db, new_account("teen_two", None)).await?;

    let ban = banned_account::create(&db, &acct.id, " skipped chores ").await?;
    assert_eq!(ban.reason_for_ban, "skipped chores");
    assert!(banned_account::create(&db, &acct.id, "   ").await.is_err());

    let note = notification::create(
        &db,
        notification::NewNotification {
            title: "Chore due".into(),
            message: "Take out the trash".into(),
            notification_type: "chore".into(),
            action_id: 7,
            user_account_id: acct.id.clone(),
        },
    )
    .await?;
    assert!(!note.is_cleared);
    let json = serde_json::to_value(&note)?;
    assert_eq!(json["type"], "chore");

    let notes = notification::Entity::find()
        .filter(notification::Column::UserAccountId.eq(acct.id.clone()))
        .all(&db)
        .await?;
    assert_eq!(notes.len(), 1);
    Ok(())
}
