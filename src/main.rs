use moral_ledger::llm::LlmClient;
use moral_ledger::{AppState, Store, resolve_db_path, router};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let db_path = resolve_db_path();
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let store = Store::open(&db_path)?;
    let llm = LlmClient::from_env()?;
    let app = router(AppState::new(store, llm));

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
