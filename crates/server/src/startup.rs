use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{auth, routes};
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // Configuration is resolved once here and injected; handlers never read
    // ambient state. Fails fast if the JWT secret or database URL is absent.
    let cfg = configs::AppConfig::load_and_validate()?;

    let db = models::db::connect(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let repo = Arc::new(SeaOrmAuthRepository { db });
    let auth_cfg = AuthConfig {
        jwt_secret: cfg.auth.jwt_secret.clone(),
        token_ttl_days: cfg.auth.token_ttl_days,
        hash_time_cost: cfg.auth.hash_time_cost,
    };
    let state = auth::ServerState { auth: Arc::new(AuthService::new(repo, auth_cfg)) };

    let app: Router = routes::build_router(build_cors(), state);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting auth server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
