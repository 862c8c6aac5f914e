//! Pathsheet Engine - Main entry point.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use pathsheet_domain::Ruleset;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod infrastructure;
mod use_cases;

use app::App;
use infrastructure::{
    clock::SystemClock, config::AppConfig, persistence::JsonCharacterRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine is usually run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pathsheet_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pathsheet Engine");

    let config = AppConfig::from_env()?;
    let ruleset = load_ruleset(config.ruleset_path.as_deref()).await?;

    tracing::info!(path = %config.data_dir.display(), "Opening character store");
    let repo = JsonCharacterRepository::new(&config.data_dir)
        .await
        .with_context(|| format!("cannot open data dir {}", config.data_dir.display()))?;

    let app = Arc::new(App::new(
        Arc::new(repo),
        Arc::new(SystemClock::new()),
        Arc::new(ruleset),
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(&config.cors_allowed_origins) {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .context("SERVER_HOST and SERVER_PORT must form a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn load_ruleset(path: Option<&Path>) -> anyhow::Result<Ruleset> {
    let Some(path) = path else {
        tracing::info!("PATHSHEET_RULESET not set, using the built-in core ruleset");
        return Ok(Ruleset::core());
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read ruleset {}", path.display()))?;
    let ruleset = Ruleset::from_json(&json)
        .with_context(|| format!("invalid ruleset {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        ancestries = ruleset.ancestries().count(),
        feats = ruleset.feats().count(),
        "Loaded ruleset"
    );
    Ok(ruleset)
}

fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    if allowed_origins.is_empty() {
        return None;
    }

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // JSON bodies trigger CORS preflights.
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
