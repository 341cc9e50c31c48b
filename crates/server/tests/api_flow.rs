use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use tower::ServiceExt;

use configs::{AppConfig, SeedConfig};
use server::startup::build_app;

const SECRET: &str = "test-secret";
const ADMIN_PASSWORD: &str = "AdminPass123";

struct TestApp {
    app: Router,
    token: String,
    admin_id: String,
}

async fn build_test_app() -> anyhow::Result<TestApp> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;

    let seed = SeedConfig {
        admin_username: Some("admin".into()),
        admin_password: Some(ADMIN_PASSWORD.into()),
        admin_email: Some("admin@home.test".into()),
    };
    service::seeder::seed_defaults(&db, &seed).await?;

    let mut cfg = AppConfig::default();
    cfg.auth.jwt_secret = SECRET.into();
    let app = build_app(db, &cfg);

    let (status, body) = send(&app, "POST", "/api/auth/login", None, Some(json!({"username": "admin", "password": ADMIN_PASSWORD}))).await?;
    assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
    Ok(TestApp {
        token: body["token"].as_str().unwrap_or_default().to_string(),
        admin_id: body["user_account_id"].as_str().unwrap_or_default().to_string(),
        app,
    })
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => builder.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, value))
}

fn account_body(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{username}@home.test"),
        "first_name": "Test",
        "last_name": "Member",
        "gender": "unspecified",
        "phone_number": "09175550101",
        "password": "Passw0rd!"
    })
}

#[tokio::test]
async fn health_and_openapi_are_public() -> anyhow::Result<()> {
    let t = build_test_app().await?;
    let (status, body) = send(&t.app, "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = send(&t.app, "GET", "/api-docs/openapi.json", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/user-accounts").is_some());
    Ok(())
}

#[tokio::test]
async fn api_requires_valid_token() -> anyhow::Result<()> {
    let t = build_test_app().await?;

    let (status, body) = send(&t.app, "GET", "/api/user-accounts", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(&t.app, "GET", "/api/user-accounts", Some("garbage"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({"sub": t.admin_id, "usr": "admin", "exp": 1_000}),
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )?;
    let (status, _) = send(&t.app, "GET", "/api/user-accounts", Some(&expired), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&t.app, "POST", "/api/auth/login", None, Some(json!({"username": "admin", "password": "wrong-pass"}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn inactive_account_is_forbidden() -> anyhow::Result<()> {
    let t = build_test_app().await?;
    let (status, created) = send(&t.app, "POST", "/api/user-accounts", Some(&t.token), Some(account_body("teen"))).await?;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let (status, login) = send(&t.app, "POST", "/api/auth/login", None, Some(json!({"username": "teen", "password": "Passw0rd!"}))).await?;
    assert_eq!(status, StatusCode::OK);
    let teen_token = login["token"].as_str().unwrap_or_default().to_string();

    let (status, _) = send(&t.app, "GET", &format!("/api/user-accounts/{id}"), Some(&teen_token), None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&t.app, "PUT", &format!("/api/user-accounts/{id}/deactivate"), Some(&t.token), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&t.app, "GET", &format!("/api/user-accounts/{id}"), Some(&teen_token), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Forbidden");

    // Banned accounts cannot log in at all
    let (status, _) = send(&t.app, "POST", &format!("/api/user-accounts/{id}/ban"), Some(&t.token), Some(json!({"reason_for_ban": "spam"}))).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&t.app, "POST", "/api/auth/login", None, Some(json!({"username": "teen", "password": "Passw0rd!"}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn user_account_lifecycle() -> anyhow::Result<()> {
    let t = build_test_app().await?;
    let tok = Some(t.token.as_str());

    let (status, role) = send(&t.app, "POST", "/api/user-roles", tok, Some(json!({"role_name": "Parent"}))).await?;
    assert_eq!(status, StatusCode::OK);
    let role_id = role["id"].as_i64().unwrap_or_default();
    assert!(role["permissions"]["id"].is_number());

    let mut body = account_body("mom");
    body["user_role_id"] = json!(role_id);
    let (status, created) = send(&t.app, "POST", "/api/user-accounts", tok, Some(body)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "active");
    assert_eq!(created["user_role"]["role_name"], "Parent");
    assert!(created.get("password_hash").is_none());
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let (status, dup) = send(&t.app, "POST", "/api/user-accounts", tok, Some(account_body("mom"))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(dup["error"], "Conflict");

    let mut bad = account_body("x");
    bad["email"] = json!("not-an-email");
    let (status, err) = send(&t.app, "POST", "/api/user-accounts", tok, Some(bad)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = err["detail"].as_str().unwrap_or_default();
    assert!(detail.contains("username") && detail.contains("email"));

    let (status, page) = send(&t.app, "GET", "/api/user-accounts?page_number=1&page_size=10&role_name=Parent", tok, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_data"], 1);
    assert_eq!(page["pages"], 1);

    let (status, page) = send(&t.app, "GET", "/api/user-accounts?page_size=1", tok, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_data"], 2);
    assert_eq!(page["pages"], 2);

    let update = json!({
        "id": id,
        "username": "mother",
        "email": "mother@home.test",
        "first_name": "Maria",
        "middle_name": "L",
        "last_name": "Cruz",
        "gender": "female",
        "phone_number": "09175550102",
        "user_role_id": role_id
    });
    let (status, updated) = send(&t.app, "PUT", "/api/user-accounts", tok, Some(update)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["username"], "mother");

    let (status, banned) = send(&t.app, "POST", &format!("/api/user-accounts/{id}/ban"), tok, Some(json!({"reason_for_ban": "late"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(banned["count_bans"], 1);
    assert_eq!(banned["status"], "banned");

    let (status, bans) = send(&t.app, "GET", &format!("/api/user-accounts/{id}/bans"), tok, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bans["total_data"], 1);
    assert_eq!(bans["data"][0]["reason_for_ban"], "late");

    let (status, active) = send(&t.app, "PUT", &format!("/api/user-accounts/{id}/activate"), tok, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active["status"], "active");

    let (status, deleted) = send(&t.app, "DELETE", &format!("/api/user-accounts/{id}"), tok, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["status"], "deleted");

    let (status, deleted_only) = send(&t.app, "GET", "/api/user-accounts?status=deleted", tok, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted_only["total_data"], 1);

    let (status, _) = send(&t.app, "GET", "/api/user-accounts/does-not-exist", tok, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn user_role_endpoints() -> anyhow::Result<()> {
    let t = build_test_app().await?;
    let tok = Some(t.token.as_str());

    let (status, role) = send(&t.app, "POST", "/api/user-roles", tok, Some(json!({"role_name": "Child"}))).await?;
    assert_eq!(status, StatusCode::OK);
    let id = role["id"].as_i64().unwrap_or_default();

    let (status, _) = send(&t.app, "POST", "/api/user-roles", tok, Some(json!({"role_name": ""}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Seeded "Super Admin" plus "Child"
    let (status, page) = send(&t.app, "GET", "/api/user-roles", tok, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_data"], 2);
    let (_, admins) = send(&t.app, "GET", "/api/user-roles?is_super_admin=true", tok, None).await?;
    assert_eq!(admins["total_data"], 1);

    let (status, updated) = send(&t.app, "PUT", "/api/user-roles", tok, Some(json!({"id": id, "role_name": "Kid", "is_super_admin": false}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["role_name"], "Kid");

    let (status, got) = send(&t.app, "GET", &format!("/api/user-roles/{id}"), tok, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(got["role_name"], "Kid");

    let (status, removed) = send(&t.app, "DELETE", &format!("/api/user-roles/{id}"), tok, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["id"], id);
    let (status, _) = send(&t.app, "GET", &format!("/api/user-roles/{id}"), tok, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn notification_endpoints() -> anyhow::Result<()> {
    let t = build_test_app().await?;
    let tok = Some(t.token.as_str());

    for title in ["Dishes", "Laundry"] {
        let (status, note) = send(
            &t.app,
            "POST",
            "/api/notifications",
            tok,
            Some(json!({"title": title, "message": "please", "type": "chore", "action_id": 3, "user_account_id": t.admin_id})),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(note["type"], "chore");
        assert_eq!(note["is_cleared"], false);
    }

    let (status, _) = send(
        &t.app,
        "POST",
        "/api/notifications",
        tok,
        Some(json!({"title": "x", "message": "y", "type": "z", "user_account_id": "ghost"})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Defaults to the caller's notifications
    let (status, read) = send(&t.app, "GET", "/api/notifications", tok, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["uncleared"], 2);
    assert_eq!(read["notifications"]["data"][0]["title"], "Laundry");
    let first_id = read["notifications"]["data"][1]["id"].clone();

    let (status, cleared) = send(&t.app, "PUT", "/api/notifications/clear", tok, Some(json!({"user_account_id": t.admin_id, "notification_id": first_id}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["cleared"], true);

    let uri = format!("/api/notifications?user_account_id={}&include_cleared=true", t.admin_id);
    let (_, all) = send(&t.app, "GET", &uri, tok, None).await?;
    assert_eq!(all["uncleared"], 1);
    assert_eq!(all["notifications"]["total_data"], 2);

    let (_, cleared) = send(&t.app, "PUT", "/api/notifications/clear", tok, Some(json!({"user_account_id": t.admin_id}))).await?;
    assert_eq!(cleared["cleared"], true);
    let (_, after) = send(&t.app, "GET", "/api/notifications", tok, None).await?;
    assert_eq!(after["uncleared"], 0);
    Ok(())
}

#[tokio::test]
async fn malformed_requests_return_json_errors() -> anyhow::Result<()> {
    let t = build_test_app().await?;
    let tok = Some(t.token.as_str());

    let mut body = account_body("noemail");
    if let Some(obj) = body.as_object_mut() {
        obj.remove("email");
    }
    let (status, err) = send(&t.app, "POST", "/api/user-accounts", tok, Some(body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Validation Error");
    assert!(err["detail"].as_str().unwrap_or_default().contains("email"));

    let (status, err) = send(&t.app, "GET", "/api/user-accounts?status=bogus", tok, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Validation Error");

    let (status, err) = send(&t.app, "GET", "/api/user-roles/abc", tok, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Validation Error");

    let (status, err) = send(&t.app, "POST", "/api/auth/login", None, Some(json!({"username": "admin"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Validation Error");
    Ok(())
}

#[tokio::test]
async fn keyword_matches_literally() -> anyhow::Result<()> {
    let t = build_test_app().await?;
    let tok = Some(t.token.as_str());
    for name in ["ab_cd", "abxcd"] {
        let (status, _) = send(&t.app, "POST", "/api/user-accounts", tok, Some(account_body(name))).await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, page) = send(&t.app, "GET", "/api/user-accounts?keyword=b_c", tok, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_data"], 1);
    assert_eq!(page["data"][0]["username"], "ab_cd");

    let (_, page) = send(&t.app, "GET", "/api/user-accounts?keyword=%25", tok, None).await?;
    assert_eq!(page["total_data"], 0);
    Ok(())
}
