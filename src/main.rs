use anyhow::Context;
use cireta_dashboard::config::Config;
use cireta_dashboard::infra::google_auth::ServiceAccountKey;
use cireta_dashboard::reports::{DateRange, ReportKind};
use cireta_dashboard::server::{start_server, AppState};
use cireta_dashboard::{logging, metrics};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Marketing analytics dashboard API: GA4 reports and socials from the marketing sheet")]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults to $DASHBOARD_CONFIG, then ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides config and $PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one GA report and print it as JSON
    Report {
        /// overview, monthly, countries, cities, devices, pages, events, sources or demographics
        kind: ReportKind,
        #[arg(long, default_value = "90daysAgo")]
        start_date: String,
        #[arg(long, default_value = "today")]
        end_date: String,
    },
    /// Fetch the marketing sheet and print the parsed socials report
    Socials,
    /// Show credential status and the GA property each report reads
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load_with(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let handle = metrics::init_metrics();
            let state = AppState::from_config(&config, handle)?;
            if let Err(e) = start_server(&config, state).await {
                error!("Server failed: {}", e);
                return Err(e);
            }
        }
        Commands::Report { kind, start_date, end_date } => {
            let range = DateRange::new(start_date, end_date);
            range.validate()?;
            let state = AppState::from_config(&config, None)?;
            let outcome = state.analytics.report(kind, &range).await;
            info!("{} report served from {}", kind, outcome.source.as_str());
            println!("{}", serde_json::to_string_pretty(&outcome.data)?);
        }
        Commands::Socials => {
            let state = AppState::from_config(&config, None)?;
            let report = state.socials.load().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Check => {
            match ServiceAccountKey::discover(&config.analytics.credentials_file)? {
                Some(key) => println!("✅ GA service account: {}", key.client_email),
                None => println!(
                    "❌ GA credentials not found (set GA_CLIENT_EMAIL/GA_PRIVATE_KEY or {})",
                    config.analytics.credentials_file
                ),
            }
            println!("\n📊 Report properties:");
            for kind in ReportKind::ALL {
                println!("   {:<13} properties/{}", kind.name(), config.analytics.property_for(kind.name()));
            }
            println!("\n📣 Sheets:");
            println!("   main   {}", config.sheets.main_url());
            println!("   emails {}", config.sheets.emails_url());
        }
    }

    Ok(())
}
