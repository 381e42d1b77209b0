//! SeaState CLI
//!
//! Terminal front end for the maritime dashboard:
//! - Fetch and render the dashboard
//! - List alerts and inspect vessels
//! - Follow the dashboard's navigation targets
//! - Raw GET/POST against the backend API

use clap::{Parser, Subcommand};
use seastate::backend::{BackendClient, RestClient};
use seastate::config::Config;
use seastate::dashboard::{
    CardKind, Dashboard, DashboardView, Navigator, Notifier, RefreshOutcome, Route,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "seastate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Maritime weather dashboard in the terminal")]
#[command(long_about = "SeaState fetches wind, sea state and weather alerts for a location\nand shows them as condition cards next to your fleet.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Write logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Exit with status 1 when a feed fails to load
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and show the dashboard
    Dashboard,

    /// Fetch and list active weather alerts
    Alerts,

    /// Show details for a vessel
    Vessel {
        /// Vessel id
        id: String,
    },

    /// Open route optimization for a vessel
    Optimize {
        /// Vessel id
        id: String,
    },

    /// Follow a dashboard link (forecast, map, alerts, recommendations,
    /// or a card: wind, waves, temperature, visibility)
    Open {
        target: String,
    },

    /// GET a path on the backend API and print the JSON
    Get {
        path: String,
    },

    /// POST a JSON body to a path on the backend API and print the JSON
    Post {
        path: String,
        /// Request body
        #[arg(short, long, default_value = "{}")]
        body: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Prints navigation targets, resolved against the front-end URL if set
struct PrintNavigator {
    frontend_url: Option<String>,
}

impl Navigator for PrintNavigator {
    fn navigate(&self, route: Route) {
        match &self.frontend_url {
            Some(base) => println!("-> {}", route.url(base)),
            None => println!("-> {}", route),
        }
    }
}

struct PrintNotifier;

impl Notifier for PrintNotifier {
    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    if cli.verbose {
        init_stderr_logging(&config);
    }

    match cli.command {
        Commands::Dashboard => {
            let dashboard = build_dashboard(&config)?;
            let outcome = dashboard.fetch_all_data().await;
            let view = dashboard.view().await;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&view)?),
                _ => print_dashboard(&view),
            }

            report_failure(&outcome, cli.strict);
        }

        Commands::Alerts => {
            let dashboard = build_dashboard(&config)?;
            let outcome = dashboard.fetch_all_data().await;
            let alerts = dashboard.alerts().await;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&alerts)?),
                _ if alerts.is_empty() => println!("No active weather alerts."),
                _ => {
                    println!("{:<8} {:<8} {}", "ID", "Severity", "Message");
                    println!("{}", "-".repeat(60));
                    for alert in &alerts {
                        println!(
                            "{:<8} {:<8} {}",
                            alert.id.to_string(),
                            alert.severity.to_string(),
                            alert.message
                        );
                    }
                }
            }

            report_failure(&outcome, cli.strict);
        }

        Commands::Vessel { id } => {
            let dashboard = build_dashboard(&config)?;
            if dashboard.handle_view_details(&id).is_none() {
                eprintln!("No vessel with id {}", id);
                std::process::exit(1);
            }
        }

        Commands::Optimize { id } => {
            let dashboard = build_dashboard(&config)?;
            dashboard.handle_optimize_route(&id);
        }

        Commands::Open { target } => {
            let dashboard = build_dashboard(&config)?;

            if let Ok(kind) = target.parse::<CardKind>() {
                dashboard.activate_card(kind);
            } else {
                match target.parse::<Route>() {
                    Ok(route) => {
                        dashboard.navigate(route);
                    }
                    Err(e) => {
                        eprintln!("{}", e);
                        eprintln!(
                            "Valid targets: forecast, map, alerts, recommendations, wind, waves, temperature, visibility"
                        );
                        std::process::exit(1);
                    }
                }
            }
        }

        Commands::Get { path } => {
            let client = RestClient::new(&config.backend.api_base)?;
            let data: serde_json::Value = client.get(&path).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }

        Commands::Post { path, body } => {
            let body: serde_json::Value = match serde_json::from_str(&body) {
                Ok(body) => body,
                Err(e) => {
                    eprintln!("Request body is not valid JSON: {}", e);
                    std::process::exit(1);
                }
            };

            let client = RestClient::new(&config.backend.api_base)?;
            let data: serde_json::Value = client.post(&path, &body).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }

        Commands::Config { output } => {
            let content = seastate::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

fn build_dashboard(config: &Config) -> anyhow::Result<Dashboard> {
    let client = BackendClient::new(config.client_config())?;
    let navigator = PrintNavigator {
        frontend_url: config.frontend.url.clone(),
    };

    Ok(Dashboard::new(Arc::new(client), config.location.clone())
        .with_fleet(config.fleet_source()?)
        .with_navigator(Arc::new(navigator))
        .with_notifier(Arc::new(PrintNotifier)))
}

fn init_stderr_logging(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(seastate::logging::env_filter(&config.logging, ""))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn report_failure(outcome: &RefreshOutcome, strict: bool) {
    if let RefreshOutcome::Failed { stage, error, .. } = outcome {
        eprintln!();
        eprintln!("warning: could not load {} data: {}", stage, error);
        eprintln!("Showing whatever loaded before the failure.");
        if strict {
            std::process::exit(1);
        }
    }
}

fn print_dashboard(view: &DashboardView) {
    println!("SeaState v{}", env!("CARGO_PKG_VERSION"));
    if let Some(updated) = view.last_updated {
        println!("Updated: {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!();

    if view.cards.is_empty() {
        println!("No weather data.");
    } else {
        println!("{:<14} {:<12} {:<10} {}", "Condition", "Value", "Status", "Link");
        println!("{}", "-".repeat(50));
        for card in &view.cards {
            println!(
                "{:<14} {:<12} {:<10} {}",
                card.title,
                card.value,
                card.status.to_string(),
                card.target
            );
        }
    }

    if let Some(banner) = &view.alert_banner {
        println!();
        println!("{} ({})", banner.title, banner.total);
        for alert in &banner.alerts {
            println!("  [{}] {}", alert.severity, alert.message);
        }
        if banner.total > banner.alerts.len() {
            println!("  ... see: seastate open {}", banner.action.path().trim_start_matches('/'));
        }
    }

    if !view.vessels.is_empty() {
        println!();
        println!("Fleet:");
        println!(
            "{:<6} {:<20} {:<12} {:<10} {:<12} {}",
            "ID", "Name", "Type", "Status", "Speed", "Wind"
        );
        println!("{}", "-".repeat(72));
        for vessel in &view.vessels {
            println!(
                "{:<6} {:<20} {:<12} {:<10} {:<12} {}",
                vessel.id.to_string(),
                vessel.name,
                vessel.vessel_type,
                vessel.status.to_string(),
                vessel.speed,
                vessel.wind
            );
        }
    }

    println!();
    println!("Forecast accuracy: {}", view.metrics.forecast_accuracy);
    println!("Vessels monitored: {}", view.metrics.vessels_monitored);
    println!("Fuel savings:      {}", view.metrics.fuel_savings);
}
