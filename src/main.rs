//! Integration Debugger Binary

use clap::{Parser, Subcommand};
use integration_debugger::{
    Config, DebugClient, DebugPage, OutputFormat, Result, ServiceName, render_page,
};
use std::time::Duration;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(version, about = "Check manage and payment backend integration")]
struct Cli {
    /// Base URL of the manage backend [default: $MANAGE_API_BASE_URL or http://localhost:8081]
    #[arg(long)]
    manage_url: Option<String>,

    /// Base URL of the payment backend [default: $PAYMENT_API_BASE_URL or http://localhost:8082]
    #[arg(long)]
    payment_url: Option<String>,

    /// HTTP timeout in seconds [default: $HTTP_TIMEOUT_SECONDS or none]
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check integration status of one service, or all when omitted
    Healthcheck {
        #[arg(value_enum)]
        service: Option<ServiceName>,
    },

    /// Create a database test object
    CreateCheck {
        #[arg(value_enum)]
        service: ServiceName,

        /// Value sent as the check's `source`
        #[arg(long)]
        source: Option<String>,
    },

    /// List the latest database test objects
    ListChecks {
        #[arg(value_enum)]
        service: ServiceName,
    },
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    fn config(&self) -> Config {
        let mut config = Config::from_env();

        if let Some(url) = &self.manage_url {
            config.manage_base_url = url.clone();
        }
        if let Some(url) = &self.payment_url {
            config.payment_base_url = url.clone();
        }
        if let Some(seconds) = self.timeout_secs {
            config.http_timeout = Some(Duration::from_secs(seconds));
        }

        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    initialize_tracing();

    let cli = Cli::parse();
    let config = cli.config();

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    debug!(
        "Debugger configuration - Manage: {}, Payment: {}, Timeout: {:?}",
        config.manage_base_url, config.payment_base_url, config.http_timeout
    );

    let page = DebugPage::new(DebugClient::new(config)?);

    let shown: Vec<ServiceName> = match &cli.command {
        Command::Healthcheck { service: None } => {
            page.run_healthcheck_for_all().await;
            ServiceName::ALL.to_vec()
        }
        Command::Healthcheck {
            service: Some(service),
        } => {
            page.load_integration(*service).await;
            vec![*service]
        }
        Command::CreateCheck { service, source } => {
            page.create_check(*service, source.as_deref()).await;
            vec![*service]
        }
        Command::ListChecks { service } => {
            page.load_checks(*service).await;
            vec![*service]
        }
    };

    let snapshot = page.snapshot().await;
    println!("{}", render_page(&snapshot, &shown, cli.format)?);

    Ok(())
}

/// Initialize logging on stderr so it never mixes with the rendered page
fn initialize_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
