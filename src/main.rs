use std::process;

use clap::Parser;
use linear_scan::cli::workflow_error_command;
use linear_scan::Cli;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with RUST_LOG environment variable support
    // Default to "info" so CI logs show each step
    // Write to stderr so logs don't mix with step outputs printed on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.execute().await {
        eprintln!("Error: {e}");

        // Print the full error chain if available
        for cause in e.chain().skip(1) {
            eprintln!("  Caused by: {cause}");
        }

        if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
            println!("{}", workflow_error_command(&e));
        }

        process::exit(1);
    }
}
