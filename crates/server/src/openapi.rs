use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginResponse { pub user_account_id: String, pub username: String, pub token: String, pub expires_at: i64 }

#[derive(ToSchema)]
pub struct CreateUserAccountDoc {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
    pub password: String,
    pub user_role_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct UpdateUserAccountDoc {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
    pub user_role_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct BanRequestDoc { pub reason_for_ban: String }

#[derive(ToSchema)]
pub struct CreateUserRoleDoc { pub role_name: String, pub is_super_admin: Option<bool> }

#[derive(ToSchema)]
pub struct UpdateUserRoleDoc { pub id: i32, pub role_name: String, pub is_super_admin: Option<bool> }

#[derive(ToSchema)]
pub struct GenerateNotificationDoc {
    pub title: String,
    pub message: String,
    #[schema(rename = "type")]
    pub notification_type: String,
    pub action_id: Option<i32>,
    pub user_account_id: String,
}

#[derive(ToSchema)]
pub struct ClearNotificationDoc { pub user_account_id: String, pub notification_id: Option<i32> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::user_accounts::create,
        crate::routes::user_accounts::list,
        crate::routes::user_accounts::update,
        crate::routes::user_accounts::get,
        crate::routes::user_accounts::delete,
        crate::routes::user_accounts::activate,
        crate::routes::user_accounts::deactivate,
        crate::routes::user_accounts::ban,
        crate::routes::user_accounts::bans,
        crate::routes::user_roles::create,
        crate::routes::user_roles::list,
        crate::routes::user_roles::update,
        crate::routes::user_roles::get,
        crate::routes::user_roles::delete,
        crate::routes::notifications::generate,
        crate::routes::notifications::read,
        crate::routes::notifications::clear,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            LoginResponse,
            CreateUserAccountDoc,
            UpdateUserAccountDoc,
            BanRequestDoc,
            CreateUserRoleDoc,
            UpdateUserRoleDoc,
            GenerateNotificationDoc,
            ClearNotificationDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "user-accounts"),
        (name = "user-roles"),
        (name = "notifications")
    )
)]
pub struct ApiDoc;
