mod analyze;
mod urls;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pricer_comps::ConditionCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricer")]
#[command(about = "Price recommendations from comparable marketplace sales")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Recommend a price for a query or an item file
    Analyze(AnalyzeArgs),
    /// Print sold and current listing search URLs for manual research
    Urls(UrlsArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Search text; mutually exclusive with --item
    #[arg(long, required_unless_present = "item", conflicts_with = "item")]
    query: Option<String>,
    /// JSON file holding an item descriptor (title, item_specifics, ...)
    #[arg(long, value_name = "FILE")]
    item: Option<PathBuf>,
    /// Markup percentage over the median comparable price
    #[arg(long)]
    markup: Option<f64>,
    /// Maximum number of comparables to fetch
    #[arg(long)]
    limit: Option<usize>,
    /// Print the full recommendation as JSON
    #[arg(long)]
    json: bool,
    /// Export the research template; defaults to a timestamped file in the export directory
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    export: Option<Option<PathBuf>>,
}

#[derive(Debug, Args)]
struct UrlsArgs {
    #[arg(long)]
    query: String,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    #[arg(long)]
    category: Option<String>,
    /// Condition label such as "new", "used" or "open box"; repeatable
    #[arg(long)]
    condition: Vec<ConditionCode>,
    /// Sold within this many days; defaults to the configured lookback
    #[arg(long)]
    days: Option<u32>,
    #[arg(long)]
    per_page: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pricer_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze(args)) => analyze::run_analyze(&config, &args).await?,
        Some(Commands::Urls(args)) => urls::run_urls(&config, &args)?,
        Some(Commands::Config) => print_config(&config)?,
        None => println!("pricer: run `pricer --help` for usage"),
    }

    Ok(())
}

fn print_config(config: &pricer_core::AppConfig) -> anyhow::Result<()> {
    let engine = pricer_core::load_engine_config(config.engine_config_path.as_deref())?;

    println!("environment:        {}", config.env);
    println!("log level:          {}", config.log_level);
    println!(
        "engine config file: {}",
        config
            .engine_config_path
            .as_deref()
            .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string())
    );
    println!(
        "comparables API:    {}",
        config.comps_api_url.as_deref().unwrap_or("(disabled)")
    );
    println!("API timeout:        {}s", config.comps_timeout_secs);
    println!("user agent:         {}", config.user_agent);
    println!("engine:");
    println!("{}", serde_json::to_string_pretty(&engine)?);
    Ok(())
}
