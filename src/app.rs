/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (identity 解決 / CORS / trace)
 * - axum::serve() で起動
 */
use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::{AppEnv, Config},
    middleware,
    services::auth::build_auth_service,
    state::AppState,
    store::{SocialStore, seed},
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,social_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    tracing::info!(
        "starting social API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState> {
    let store = match config.app_env {
        // Development boots with the demo data set so the API is explorable
        // right away. Production starts empty.
        AppEnv::Development => seed::demo()?,
        AppEnv::Production => SocialStore::new(),
    };
    let auth = build_auth_service(config);

    Ok(AppState::new(store, auth))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let v1 = middleware::auth::access::apply(api::v1::routes(), state.clone());

    let app = Router::new().nest("/api/v1", v1).with_state(state);
    let app = middleware::cors::apply(app, config);

    app.layer(TraceLayer::new_for_http())
}
