//! AdVision CLI binary.
//!
//! This binary provides command-line access to AdVision:
//! - Generate a six-frame storyboard and render every frame
//! - Regenerate frames interactively
//! - Print the script alone

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_generate, run_script};

    // Parse command-line arguments
    let cli = Cli::parse();

    // GEMINI_API_KEY may live in a .env file
    dotenvy::dotenv().ok();

    let log_level = if cli.verbose { "debug" } else { "info" };

    #[cfg(feature = "observability")]
    let guard = advision::observability::init_observability_with_config(
        advision::observability::ObservabilityConfig::default()
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )?;

    #[cfg(not(feature = "observability"))]
    init_logging(log_level, cli.json_logs)?;

    // Execute the requested command
    let result = match cli.command {
        Commands::Generate {
            brief,
            aspect_ratio,
            format,
            interactive,
        } => run_generate(brief, aspect_ratio, format, interactive).await,

        Commands::Script { brief, format } => run_script(brief, format).await,
    };

    #[cfg(feature = "observability")]
    guard.shutdown();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(not(feature = "observability"))]
fn init_logging(log_level: &str, json_logs: bool) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;

    let fmt_layer = if json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
