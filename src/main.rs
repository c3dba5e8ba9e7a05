use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use pricewise::{
    AppState, ProductSearchTools, ResearchPipeline, TavilyClient,
    api::routes,
    cli::{
        Cli, Commands,
        init::{self, InitConfig, InitResult},
        output::{Output, save_result},
    },
    utils::toml_config::{ConfigError, PricewiseConfig},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    // init runs before a config file exists
    if let Commands::Init {
        path,
        force,
        provider,
    } = &cli.command
    {
        init_tracing(&cli, "info");
        return match init::run(
            InitConfig {
                path: path.clone(),
                force: *force,
                provider: provider.clone(),
            },
            &output,
        ) {
            InitResult::Success | InitResult::AlreadyExists => Ok(()),
            InitResult::Error(e) => Err(anyhow::anyhow!(e)),
        };
    }

    let loaded = PricewiseConfig::load(&cli.config);
    let log_level = loaded
        .as_ref()
        .map(|c| c.server.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&cli, &log_level);

    // Logged only now that a subscriber is installed
    let config = match loaded {
        Err(ConfigError::FileNotFound(missing)) => {
            tracing::info!(
                "No configuration file at {}, using built-in defaults",
                missing.display()
            );
            PricewiseConfig::default()
        }
        other => other.with_context(|| format!("loading {}", cli.config.display()))?,
    };

    match cli.command {
        Commands::Research {
            query,
            output: output_path,
            json,
            no_save,
        } => run_research(&config, &output, query.join(" "), output_path, json, no_save).await,
        Commands::Compare {
            product_a,
            product_b,
            max_results,
        } => run_compare(&config, &product_a, &product_b, max_results).await,
        Commands::Serve { host, port } => run_serve(config, &output, host, port).await,
        Commands::Config { validate } => run_config(&cli.config, &config, &output, validate),
        Commands::Init { .. } => Ok(()),
    }
}

/// Log to stderr so `--json` output on stdout stays machine-readable
fn init_tracing(cli: &Cli, level: &str) {
    let filter = if cli.verbose {
        EnvFilter::new("pricewise=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("pricewise={level},tower_http={level}")))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_research(
    config: &PricewiseConfig,
    output: &Output,
    query: String,
    output_path: Option<PathBuf>,
    json: bool,
    no_save: bool,
) -> Result<()> {
    let pipeline = ResearchPipeline::from_config(config).await?;

    if !json {
        output.banner();
        output.info(&format!("Researching: {}", query));
    }

    let result = pipeline.run(&query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output.research_result(&result);
    }

    if !no_save {
        let path = output_path.unwrap_or_else(|| config.output.results_path.clone());
        save_result(&path, &result)
            .with_context(|| format!("writing {}", path.display()))?;
        if !json {
            output.success(&format!("Results saved to {}", path.display()));
        }
    }

    Ok(())
}

async fn run_compare(
    config: &PricewiseConfig,
    product_a: &str,
    product_b: &str,
    max_results: Option<usize>,
) -> Result<()> {
    let tavily = TavilyClient::from_config(&config.search)?;
    let tools = ProductSearchTools::new(Arc::new(tavily), &config.search);

    let (report, _) = tools
        .comparison_report(product_a, product_b, max_results)
        .await;
    println!("{}", report);
    Ok(())
}

async fn run_serve(
    config: PricewiseConfig,
    output: &Output,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let pipeline = ResearchPipeline::from_config(&config).await?;
    let state = AppState {
        config: Arc::new(config),
        pipeline: Arc::new(pipeline),
    };
    let app = routes::app(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    output.banner();
    output.success(&format!("Listening on http://{}", addr));
    tracing::info!(%addr, "Server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

fn run_config(
    path: &std::path::Path,
    config: &PricewiseConfig,
    output: &Output,
    validate: bool,
) -> Result<()> {
    if validate {
        PricewiseConfig::load(path)?;
        output.success(&format!("{} is valid", path.display()));
        return Ok(());
    }

    output.header("Configuration");
    output.kv("file", &path.display().to_string());
    output.kv("llm", &format!("{} ({})", config.llm.kind(), config.llm.model()));
    output.kv("search", &config.search.api_base);
    output.newline();
    // Secrets are stored as env var names, so the full dump is safe to print.
    println!("{}", config.to_toml_string()?);
    Ok(())
}
