//! # Saaty - AHP Criteria Weighting
//!
//! The main binary: an interactive questionnaire, one-shot commands and an
//! HTTP server over the same weighting engine.
//!
//! ## Usage
//!
//! ```bash
//! # Answer the questionnaire and save the result
//! saaty
//!
//! # Compute weights from a file
//! saaty solve -f request.json
//!
//! # Start the HTTP server
//! saaty server --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use saaty::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // SAATY_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SAATY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "saaty=debug,saaty_core=debug,tower_http=debug"
    } else {
        "saaty=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr; stdout carries reports and JSON.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Saaty startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗ █████╗  █████╗ ████████╗██╗   ██╗
  ██╔════╝██╔══██╗██╔══██╗╚══██╔══╝╚██╗ ██╔╝
  ███████╗███████║███████║   ██║    ╚████╔╝
  ╚════██║██╔══██║██╔══██║   ██║     ╚██╔╝
  ███████║██║  ██║██║  ██║   ██║      ██║
  ╚══════╝╚═╝  ╚═╝╚═╝  ╚═╝   ╚═╝      ╚═╝

  Pairwise Criteria Weighting v{}

  Geometric-mean priorities on the 1-9 scale
"#,
        env!("CARGO_PKG_VERSION")
    );
}
