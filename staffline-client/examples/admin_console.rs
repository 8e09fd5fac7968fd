//! Minimal admin walkthrough against a local backend.
//!
//! Start the mock backend first (`cargo run -p staffline-mock-backend`),
//! then run this example. Set `STAFFLINE_BASE_URL` to point elsewhere.

use anyhow::Result;
use staffline_client::{ClientConfig, EmployeeDirectory, StafflineClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url = std::env::var("STAFFLINE_BASE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000/api".into());
    let mut client = StafflineClient::connect(&ClientConfig::new(base_url))?;

    let session = client.bootstrap().await;
    println!("session after bootstrap: signed_in={}", session.is_signed_in());

    match client.login_admin("admin", "admin123").await {
        Ok(user) => println!("logged in as {} ({})", user.display_name(), user.role()),
        Err(err) => {
            println!("login failed: {}", err.login_failure_message());
            return Ok(());
        }
    }

    let mut directory = EmployeeDirectory::new();
    directory.refresh(client.session(), client.api()).await?;
    for row in directory.rows() {
        println!(
            "#{:<4} {:<16} active_permission={}",
            row.id,
            row.username,
            row.is_active_permission
        );
    }

    if let Some(first) = directory.rows().first().map(|r| r.id) {
        let outcome = directory.toggle(client.api(), first).await?;
        println!("toggled employee {first}: {outcome:?}");
    }

    client.logout().await;
    println!("logged out");
    Ok(())
}
