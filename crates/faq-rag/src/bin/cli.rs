//! Terminal FAQ assistant
//!
//! Run with: cargo run -p faq-rag --bin faq-rag-cli

use clap::Parser;
use faq_rag::{
    providers::GenerationParams,
    repl::{Repl, ReplExit},
    ChatSession, RagConfig, RagPipeline,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "faq-rag-cli")]
#[command(about = "Ask questions about the Sunrise Realty FAQ", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "FAQ_RAG_CONFIG")]
    config: Option<PathBuf>,

    /// FAQ document to answer from
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Chat model for every answer in this run
    #[arg(short, long)]
    model: Option<String>,

    /// Number of chunks retrieved per question
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Answer one question and exit
    #[arg(short, long)]
    question: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "faq_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = RagConfig::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        config.source_path = source;
    }
    if let Some(top_k) = cli.top_k {
        config.retrieval.top_k = top_k;
    }

    let pipeline = RagPipeline::from_config(&config)?;
    let params = GenerationParams::from_config(&config.llm).with_model(cli.model.as_deref());

    tracing::info!("Source document: {}", pipeline.source_path().display());
    tracing::info!("Chat model: {}", params.model);

    let repl = Repl::new(&pipeline, params);
    let mut session = ChatSession::new();
    let mut stdout = tokio::io::stdout();

    if let Some(question) = cli.question {
        repl.ask_once(&mut session, &question, &mut stdout).await?;
        return Ok(());
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stderr = tokio::io::stderr();
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    let exit = repl
        .run(&mut session, stdin, &mut stdout, &mut stderr, shutdown)
        .await?;

    if exit == ReplExit::Interrupted {
        // The pending stdin read would otherwise keep the runtime alive
        std::process::exit(0);
    }

    Ok(())
}
