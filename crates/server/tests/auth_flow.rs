use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::Service;
use uuid::Uuid;

use migration::MigratorTrait;
use server::auth::ServerState;
use server::routes;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

// Builds the router against a real database; returns None (test skipped)
// when no database is reachable.
async fn build_app() -> anyhow::Result<Option<Router>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    let db = match models::db::connect_from_env().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return Ok(None);
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return Ok(None);
    }
    let repo = Arc::new(SeaOrmAuthRepository { db });
    let mut auth_cfg = AuthConfig::new("test-secret");
    auth_cfg.hash_time_cost = Some(1);
    let state = ServerState { auth: Arc::new(AuthService::new(repo, auth_cfg)) };
    Ok(Some(routes::build_router(cors(), state)))
}

fn post_json(uri: &str, body: &serde_json::Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}

async fn body_json(resp: axum::response::Response) -> anyhow::Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn test_register_login_profile_flow() -> anyhow::Result<()> {
    let Some(mut app) = build_app().await? else { return Ok(()) };

    let email = format!("user_{}@example.com", Uuid::new_v4());
    let password = "longenough1";

    // Register
    let req = post_json("/api/register", &json!({
        "name": "Ana", "email": email, "password": password,
        "confirmPassword": password, "fitnessLevel": "beginner"
    }))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await?;
    let token = body["token"].as_str().expect("token present").to_string();
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"].get("passwordHash").is_none());
    assert!(!body.to_string().contains("$argon2"));

    // Login
    let req = post_json("/api/login", &json!({"email": email, "password": password}))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert!(body["token"].as_str().is_some());

    // Profile echoes the claims from the register token
    let req = Request::builder()
        .method("GET")
        .uri("/api/profile")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"]["sub"].as_str().is_some());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_registration_rejected() -> anyhow::Result<()> {
    let Some(mut app) = build_app().await? else { return Ok(()) };

    let email = format!("user_{}@example.com", Uuid::new_v4());
    let input = json!({
        "name": "Dup", "email": email, "password": "longenough1",
        "confirmPassword": "longenough1", "fitnessLevel": "beginner"
    });
    let resp = app.call(post_json("/api/register", &input)?).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.call(post_json("/api/register", &input)?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_register_short_password_rejected() -> anyhow::Result<()> {
    let Some(mut app) = build_app().await? else { return Ok(()) };

    let req = post_json("/api/register", &json!({
        "name": "A", "email": format!("user_{}@example.com", Uuid::new_v4()),
        "password": "short", "confirmPassword": "short", "fitnessLevel": "beginner"
    }))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() -> anyhow::Result<()> {
    let Some(mut app) = build_app().await? else { return Ok(()) };

    let email = format!("user_{}@example.com", Uuid::new_v4());
    let resp = app
        .call(post_json("/api/register", &json!({
            "name": "Tester", "email": email, "password": "StrongPass123",
            "confirmPassword": "StrongPass123", "fitnessLevel": "advanced"
        }))?)
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Wrong password
    let resp = app
        .call(post_json("/api/login", &json!({"email": email, "password": "wrongwrong"}))?)
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let wrong_pw = body_json(resp).await?;

    // Unknown email: same status, same message
    let resp = app
        .call(post_json("/api/login", &json!({
            "email": format!("nobody_{}@example.com", Uuid::new_v4()),
            "password": "StrongPass123"
        }))?)
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let unknown = body_json(resp).await?;
    assert_eq!(wrong_pw["message"], unknown["message"]);
    Ok(())
}

#[tokio::test]
async fn test_profile_without_token_unauthenticated() -> anyhow::Result<()> {
    let Some(mut app) = build_app().await? else { return Ok(()) };

    let req = Request::builder().method("GET").uri("/api/profile").body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_profile_with_bad_token_forbidden() -> anyhow::Result<()> {
    let Some(mut app) = build_app().await? else { return Ok(()) };

    let req = Request::builder()
        .method("GET")
        .uri("/api/profile")
        .header("authorization", "Bearer not.a.jwt")
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    Ok(())
}
