//! # Onboard - Employee Onboarding Tracker
//!
//! The main binary for the onboarding tracker.
//!
//! This application provides:
//! - HTTP REST API server (axum-based, JWT-authenticated)
//! - CLI interface for record administration
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │               apps/onboard (THE BINARY)              │
//! │                                                      │
//! │   ┌─────────────┐          ┌─────────────┐           │
//! │   │    CLI      │          │  HTTP API   │           │
//! │   │   (clap)    │          │   (axum)    │           │
//! │   └──────┬──────┘          └──────┬──────┘           │
//! │          └────────────┬───────────┘                  │
//! │                       ▼                              │
//! │               ┌───────────────┐                      │
//! │               │ onboard-core  │                      │
//! │               │  (THE LOGIC)  │                      │
//! │               └───────────────┘                      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Bootstrap an administrator, then start the server
//! onboard enroll --name Admin --email admin@example.com --password s3cret --admin
//! onboard server --port 5000
//!
//! # CLI operations
//! onboard list
//! onboard complete <id> 3
//! onboard stats --json-mode
//! ```

use clap::Parser;
use onboard::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // ONBOARD_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ONBOARD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "onboard=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
   ___  _ __ | |__   ___   __ _ _ __ __| |
  / _ \| '_ \| '_ \ / _ \ / _` | '__/ _` |
 | (_) | | | | |_) | (_) | (_| | | | (_| |
  \___/|_| |_|_.__/ \___/ \__,_|_|  \__,_|

  Employee Onboarding Tracker v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
