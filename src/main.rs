//! LabZen
//!
//! An MCP server exposing the LabZen lab calculators over stdio.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use labzen::build_info;
use labzen::config::Settings;
use labzen::mcp::LabzenService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so stdout stays clean for MCP framing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("labzen=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let settings = Settings::from_env();
    tracing::info!(precision = settings.precision, "Loaded settings");

    let service = LabzenService::new(settings);

    eprintln!("Starting MCP server on stdio...");
    let server = service.serve((stdin(), stdout())).await?;

    server.waiting().await?;

    Ok(())
}
