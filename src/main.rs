use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use papyrus_core::config::Config;
use papyrus_core::session::ChatSession;
use papyrus_llm::openai::OpenAiProvider;
use papyrus_llm::provider::{GenerationParams, LlmProvider, embed_fn_for};
use papyrus_memory::splitter::{SplitterConfig, TextSplitter};
use papyrus_memory::{IngestionPipeline, loader_for};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt};

#[derive(Parser)]
#[command(name = "papyrus", about = "Chat with a hosted model, optionally over a document")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "papyrus.toml")]
    config: PathBuf,

    /// Override the sampling temperature (0.0 to 1.0).
    #[arg(long)]
    temperature: Option<f32>,

    /// Override the response token limit.
    #[arg(long)]
    max_tokens: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Plain chat with the model.
    Chat,
    /// Chat over a document: chunk, embed, and retrieve before each answer.
    Doc {
        /// Document to load (txt, md, or pdf).
        path: PathBuf,

        /// Number of chunks retrieved per question.
        #[arg(long)]
        top_k: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config).context("loading config")?;

    let params = GenerationParams {
        max_tokens: cli.max_tokens.unwrap_or(config.llm.max_tokens),
        temperature: cli.temperature.unwrap_or(config.llm.temperature),
    };
    if !(0.0..=1.0).contains(&params.temperature) {
        bail!("temperature must be between 0.0 and 1.0");
    }

    let provider = OpenAiProvider::new(
        config.api_key(),
        config.llm.base_url.clone(),
        config.llm.model.clone(),
        config.llm.embedding_model.clone(),
    );
    let timeout = Duration::from_secs(config.chat.request_timeout_secs);

    let session = match cli.command {
        Command::Chat => ChatSession::new(
            provider.clone(),
            embed_fn_for(Arc::new(provider)),
            params,
            timeout,
        ),
        Command::Doc { path, top_k } => {
            if !provider.supports_embeddings() {
                bail!("document mode needs an embedding_model in [llm]");
            }

            let splitter = TextSplitter::new(SplitterConfig {
                chunk_size: config.splitter.chunk_size,
                chunk_overlap: config.splitter.chunk_overlap,
            })?;
            let loader = loader_for(&path)?;
            let embed = embed_fn_for(Arc::new(provider.clone()));

            eprintln!("Indexing {}...", path.display());
            let index = IngestionPipeline::new(splitter)
                .load_and_ingest(loader.as_ref(), &path, &embed)
                .await
                .context("ingesting document")?;
            eprintln!("Indexed {} chunks.", index.len());

            ChatSession::new(provider.clone(), embed_fn_for(Arc::new(provider)), params, timeout)
                .with_index(index, top_k.unwrap_or(config.chat.top_k))
        }
    };

    repl(&session).await
}

async fn repl<P: LlmProvider>(session: &ChatSession<P>) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"You: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line == "exit" || line == "quit" {
            break;
        }

        match session.ask(line).await {
            Ok(answer) => println!("Bot: {answer}\n"),
            Err(e) => eprintln!("error: {e}\n"),
        }
    }

    Ok(())
}
