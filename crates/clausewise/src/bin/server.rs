//! ClauseWise server binary
//!
//! Run with: cargo run -p clausewise --bin clausewise-server

use clausewise::{config::ClauseWiseConfig, server::ClauseWiseServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clausewise=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                        ClauseWise                         ║
║        Legal Document Analysis and Plain Language         ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration
    let config = ClauseWiseConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Summarization model: {}", config.inference.models.summarization);
    tracing::info!("  - Q&A model: {}", config.inference.models.question_answering);
    tracing::info!("  - Speech engine: {}", config.speech.command);

    if !config.inference.is_enabled() {
        tracing::warn!("HF_API_KEY not set, running with local heuristics only");
    }

    // Create and start server
    let server = ClauseWiseServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/documents             - Upload a document");
    println!("  POST /api/documents/:id/summary - Summarize");
    println!("  POST /api/documents/:id/ask     - Ask questions");
    println!("  POST /api/speech                - Read text aloud");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
