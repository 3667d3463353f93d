use std::sync::Arc;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use startpage::api;
use startpage::backend::BackendClient;
use startpage::config::Config;
use startpage::dashboard::Dashboard;
use startpage::db::Database;
use startpage::fetcher::{FeedFetcher, HttpRelay};
use startpage::notifier::Notifier;
use startpage::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "startpage=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path =
        std::env::var("STARTPAGE_CONFIG").unwrap_or_else(|_| "startpage.toml".to_string());
    let config = Config::load_or_default(&config_path)?;
    info!("Configuration loaded (relay: {})", config.relay.endpoint);

    // Initialize database
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| config.database_url.clone());
    let db = Database::new(&database_url).await?;
    db.initialize().await?;
    info!("Database initialized");

    let db = Arc::new(db);

    // Dashboard: talks to the backend over HTTP, like any other client
    let backend = BackendClient::new(&config.backend_url())?;
    let fetcher = FeedFetcher::new(Arc::new(HttpRelay::new()?), &config.relay)?;
    let notifier = Notifier::from_config(&config.notifications);
    let dashboard = Arc::new(Dashboard::new(backend, fetcher, notifier));

    // Build router
    let app = api::router(db)
        .merge(web::router(dashboard))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("Server starting on http://{}", config.listen);

    axum::serve(listener, app).await?;

    Ok(())
}
