use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use thinkchat::connector::api::Router;
use thinkchat::connector::{API_KEY_ENV, DEFAULT_TIMEOUT_SECS};
use thinkchat::{
    Commands, Container, ContainerConfig, DEFAULT_GREETING, DEFAULT_SESSION_TTL_SECS,
    DEFAULT_SYSTEM_PROMPT,
};

#[derive(Parser)]
#[command(name = "thinkchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.thinkchat")]
    data_dir: String,

    /// Answer with a local echo model instead of calling the API
    #[arg(long, global = true)]
    mock_llm: bool,

    #[arg(long, global = true)]
    base_url: Option<String>,

    #[arg(long, global = true)]
    model: Option<String>,

    /// JSON file with an "api_key" field (default: <data-dir>/secrets.json)
    #[arg(long, global = true)]
    secrets_file: Option<String>,

    /// Show replies with inverted <think> markers unsplit
    #[arg(long, global = true)]
    strict_markers: bool,

    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Drop web sessions idle for this many seconds
    #[arg(long, global = true, default_value_t = DEFAULT_SESSION_TTL_SECS)]
    session_ttl_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ContainerConfig {
        data_dir: expand_tilde(&cli.data_dir),
        mock_llm: cli.mock_llm,
        base_url: cli.base_url,
        model: cli.model,
        api_key: std::env::var(API_KEY_ENV).ok(),
        secrets_file: cli.secrets_file.as_deref().map(expand_tilde),
        strict_markers: cli.strict_markers,
        timeout_secs: cli.timeout_secs,
        session_ttl_secs: cli.session_ttl_secs,
        system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        greeting: DEFAULT_GREETING.to_string(),
    };

    let container = Arc::new(Container::new(config)?);
    let router = Router::new(container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
