use anyhow::{Context, Result};
use askpanel::api::{self, app_state::AppState};
use askpanel::client::{HttpQueryClient, QueryClient};
use askpanel::config::config::AppConfig;
use askpanel::config::loader::{ConfigLoader, default_config_path};
use askpanel::format::TextFormatter;
use askpanel::models::FormInput;
use askpanel::observability::{AppMetrics, ObservabilityState, create_observability_router, init_tracing};
use askpanel::widget::{FormController, PageView, ResultRenderer};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "askpanel", version, about = "Ask questions against a retrieval-augmented answering backend")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit one question and print the rendered result
    Ask(AskArgs),
    /// Format answer text read from stdin as HTML
    Format,
    /// Probe the backend health endpoint
    Health,
    /// Serve the question page over HTTP
    Serve(ServeArgs),
}

#[derive(Args)]
struct AskArgs {
    /// The question to ask
    question: String,

    /// Number of chunks the backend should retrieve
    #[arg(long = "top-k", value_name = "N")]
    top_k: Option<String>,

    /// API key forwarded to the backend
    #[arg(long = "api-key", env = "ASKPANEL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Print the whole page instead of the results card
    #[arg(long)]
    page: bool,
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,
}

fn formatter_for(config: &AppConfig) -> TextFormatter {
    if config.formatter.hardened {
        TextFormatter::hardened()
    } else {
        TextFormatter::new()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from(path),
        None => ConfigLoader::load(),
    }
    .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    if let Command::Serve(args) = &cli.command {
        if let Some(host) = &args.host {
            config.server.host = host.clone();
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
    }
    ConfigLoader::validate(&config).context("Invalid configuration")?;

    let _log_guard = init_tracing("askpanel", &config.logging);
    info!("Configuration loaded from {}", config_path.display());

    match cli.command {
        Command::Ask(args) => ask(config, args).await,
        Command::Format => format_stdin(&config),
        Command::Health => health(&config).await,
        Command::Serve(_) => serve(config).await,
    }
}

async fn ask(config: AppConfig, args: AskArgs) -> Result<()> {
    let client = Arc::new(HttpQueryClient::new(&config.backend)?);

    let top_k = args
        .top_k
        .unwrap_or_else(|| config.form.default_top_k.to_string());
    let mut input = FormInput::new(args.question, top_k);
    input.api_key = args.api_key;

    let page = PageView::from_config(&config).with_form(input);
    let renderer = ResultRenderer::new(formatter_for(&config));
    let mut controller = FormController::with_renderer(page, client, renderer);

    let outcome = controller.submit().await;
    let page = controller.into_view();
    let html = if args.page {
        page.render_page()
    } else {
        page.render_results_card()
    }
    .context("Failed to render page")?;
    print!("{}", html);

    outcome.map_err(|e| anyhow::anyhow!("Submission failed: {}", e))
}

fn format_stdin(config: &AppConfig) -> Result<()> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;

    println!("{}", formatter_for(config).format(&text));
    Ok(())
}

async fn health(config: &AppConfig) -> Result<()> {
    let client = HttpQueryClient::new(&config.backend)?;
    let health = client.health().await?;

    println!("{}", health.status);
    if !health.is_healthy() {
        anyhow::bail!("Backend reported status '{}'", health.status);
    }
    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    info!("Starting Askpanel...");

    let client: Arc<dyn QueryClient> = Arc::new(HttpQueryClient::new(&config.backend)?);
    info!("Backend client targeting {}", config.backend.base_url);

    let metrics = Arc::new(AppMetrics::default());
    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        client.clone(),
        metrics.clone(),
    ));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = AppState::new(config, client, metrics);
    let router = create_observability_router(observability_state)
        .merge(api::initialize_api(app_state).await?);
    info!("Page router created with observability endpoints");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
