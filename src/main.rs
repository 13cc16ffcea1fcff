use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use smartbuy::api::{ApiError, RecommendationQuery};
use smartbuy::catalog::Phone;
use smartbuy::config::Config;
use smartbuy::filters::{normalize_brand, parse_max_price, Mode};
use smartbuy::ranking::RankedItem;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

/// Search filters shared by `list` and `open`
#[derive(clap::Args, Debug, Clone, Default)]
struct SearchArgs {
    /// Recommendation mode (budget, midrange, flagship)
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Brand filter ("Any" for all brands)
    #[arg(short, long)]
    brand: Option<String>,

    /// Minimum RAM in GB
    #[arg(long)]
    min_ram: Option<f64>,

    /// Max price in SGD, or a picker label such as "Any"
    #[arg(long)]
    max_price: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List recommended phones, ranked (default if no subcommand)
    List {
        #[command(flatten)]
        search: SearchArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Show the spec breakdown for every phone
        #[arg(short, long)]
        detail: bool,
    },
    /// Browse recommendations interactively
    Browse,
    /// Open a phone's price link in the browser by its index number
    Open {
        /// Index number of the phone to open (1-based, as shown in list)
        index: usize,

        #[command(flatten)]
        search: SearchArgs,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "smartbuy")]
#[command(about = "Phone recommendations ranked by specs and value", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/smartbuy/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Recommendation service URL (overrides the config file)
    #[arg(long, global = true, env = "SMARTBUY_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Merge command-line filters over the config defaults
fn build_query(search: &SearchArgs, config: &Config) -> RecommendationQuery {
    let defaults = &config.defaults;
    RecommendationQuery {
        mode: search.mode.or(defaults.mode).unwrap_or_default(),
        brand: search
            .brand
            .as_deref()
            .or(defaults.brand.as_deref())
            .and_then(normalize_brand),
        min_ram: search.min_ram.or(defaults.min_ram),
        max_price: search
            .max_price
            .as_deref()
            .map(parse_max_price)
            .or(defaults.max_price),
    }
}

/// Exit code for a failed fetch: HTTP 400 means the filters were rejected
fn fetch_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Status { status: 400, .. }) => EXIT_CONFIG,
        _ => EXIT_NETWORK,
    }
}

async fn fetch_or_exit(
    client: &reqwest::Client,
    base_url: &str,
    query: &RecommendationQuery,
) -> Vec<RankedItem<Phone>> {
    match smartbuy::fetch::fetch_and_rank(client, base_url, query).await {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Failed to fetch recommendations: {:#}", e);
            std::process::exit(fetch_exit_code(&e));
        }
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    smartbuy::logging::init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::List {
        search: SearchArgs::default(),
        format: OutputFormat::Table,
        detail: false,
    });
    let config_path = cli.config.map(PathBuf::from);

    if matches!(command, Commands::Init) {
        if let Err(e) = smartbuy::config::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let start_time = Instant::now();

    // Load config
    let mut config = match smartbuy::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    // Validate config at startup
    if let Err(errors) = config.validate() {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    tracing::info!(api_url = %config.api_url, "using recommendation service");

    let client = match smartbuy::api::create_client(config.request_timeout()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {:#}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    match command {
        Commands::List {
            search,
            format,
            detail,
        } => {
            let query = build_query(&search, &config);
            let items = fetch_or_exit(&client, &config.api_url, &query).await;
            let use_colors = smartbuy::output::should_use_colors();

            match format {
                OutputFormat::Json => match smartbuy::output::format_json(&items) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_NETWORK);
                    }
                },
                OutputFormat::Tsv => {
                    let output = smartbuy::output::format_tsv(&items);
                    if !output.is_empty() {
                        println!("{}", output);
                    }
                }
                OutputFormat::Table if detail && !items.is_empty() => {
                    let table = config.category_table();
                    for ranked in &items {
                        println!(
                            "{}",
                            smartbuy::output::format_phone_detail(
                                ranked, &table, query.mode, use_colors
                            )
                        );
                        println!();
                    }
                }
                OutputFormat::Table => {
                    println!(
                        "{}",
                        smartbuy::output::format_results_table(&items, use_colors)
                    );
                }
            }

            tracing::info!(
                count = items.len(),
                elapsed = ?start_time.elapsed(),
                "done"
            );
        }
        Commands::Open { index, search } => {
            let query = build_query(&search, &config);
            let items = fetch_or_exit(&client, &config.api_url, &query).await;

            // Validate index bounds (1-based)
            if index < 1 || index > items.len() {
                eprintln!(
                    "Invalid index {}. Must be between 1 and {}.",
                    index,
                    items.len()
                );
                std::process::exit(EXIT_CONFIG);
            }

            let phone = &items[index - 1].item;
            let Some(url) = phone.price_url.as_deref().filter(|u| !u.is_empty()) else {
                eprintln!("{} has no price link.", phone.display_name());
                std::process::exit(EXIT_CONFIG);
            };

            if let Err(e) = smartbuy::browser::open_url(url) {
                eprintln!("Failed to open browser: {:#}", e);
                std::process::exit(EXIT_NETWORK);
            }

            println!("Opening {} in browser: {}", phone.display_name(), url);
        }
        Commands::Browse => {
            let app = smartbuy::tui::App::new(&config);
            if let Err(e) = smartbuy::tui::run_tui(app, client, config.api_url.clone()).await {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_NETWORK);
            }
        }
        // Handled before the config is loaded
        Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartbuy::config::SearchDefaults;

    #[test]
    fn test_cli_parses() {
        Cli::try_parse_from([
            "smartbuy", "list", "--mode", "budget", "--brand", "Samsung", "--max-price", "800",
            "--format", "tsv",
        ])
        .unwrap();
        Cli::try_parse_from(["smartbuy", "open", "2", "-m", "flagship"]).unwrap();
        Cli::try_parse_from(["smartbuy", "browse", "--verbose"]).unwrap();
        assert!(Cli::try_parse_from(["smartbuy", "list", "--mode", "cheap"]).is_err());
    }

    #[test]
    fn test_build_query_cli_wins() {
        let config = Config {
            defaults: SearchDefaults {
                mode: Some(Mode::Budget),
                brand: Some("Google".to_string()),
                min_ram: Some(6.0),
                max_price: Some(600),
            },
            ..Config::default()
        };
        let search = SearchArgs {
            mode: Some(Mode::Flagship),
            brand: Some("Any".to_string()),
            min_ram: None,
            max_price: Some("5000".to_string()),
        };
        let q = build_query(&search, &config);
        assert_eq!(q.mode, Mode::Flagship);
        assert_eq!(q.brand, None);
        assert_eq!(q.min_ram, Some(6.0));
        assert_eq!(q.max_price, Some(2400));
    }

    #[test]
    fn test_build_query_defaults() {
        let q = build_query(&SearchArgs::default(), &Config::default());
        assert_eq!(q.mode, Mode::Midrange);
        assert_eq!(q.brand, None);
        assert_eq!(q.max_price, None);
    }

    #[test]
    fn test_fetch_exit_code() {
        let rejected: anyhow::Error = ApiError::Status {
            status: 400,
            detail: Some("Invalid filter input.".to_string()),
        }
        .into();
        assert_eq!(fetch_exit_code(&rejected), EXIT_CONFIG);
        let server: anyhow::Error = ApiError::Status {
            status: 500,
            detail: None,
        }
        .into();
        assert_eq!(fetch_exit_code(&server), EXIT_NETWORK);
        assert_eq!(fetch_exit_code(&anyhow::anyhow!("connection refused")), EXIT_NETWORK);
    }
}
