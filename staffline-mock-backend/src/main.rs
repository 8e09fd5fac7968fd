use anyhow::Result;
use staffline_mock_backend::{BackendState, router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = BackendState::new();
    state.seed_admin("admin", "admin123");
    state.seed_employee("bob", "bob12345", false);

    let addr = std::env::var("STAFFLINE_MOCK_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "mock backend listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
