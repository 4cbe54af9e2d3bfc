//! Web chat server
//!
//! Run with: cargo run -p faq-rag --bin faq-rag-server

use clap::Parser;
use faq_rag::{server::ChatServer, RagConfig, RagPipeline};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "faq-rag-server")]
#[command(about = "Serve the Sunrise Realty FAQ assistant as a web chat", long_about = None)]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "FAQ_RAG_CONFIG")]
    config: Option<PathBuf>,

    /// FAQ document to answer from
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Bind host
    #[arg(long)]
    host: Option<String>,

    /// Bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "faq_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║              Sunrise Realty Q&A Assistant                 ║
║        FAQ answers grounded in retrieved context          ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    let mut config = RagConfig::load(args.config.as_deref())?;
    if let Some(source) = args.source {
        config.source_path = source;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Source document: {}", config.source_path.display());
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - Chat model: {}", config.llm.generate_model);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - Top K: {}", config.retrieval.top_k);

    if !config.source_path.exists() {
        tracing::warn!(
            "Source document {} not found; every question will fail until it exists",
            config.source_path.display()
        );
    }

    let pipeline = RagPipeline::from_config(&config)?;
    let server = ChatServer::new(config, pipeline);

    println!("\nServer starting...");
    println!("  Chat: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server
        .start(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
