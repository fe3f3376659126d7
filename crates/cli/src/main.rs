//! sitedeploy - deploy static websites to S3 and Route 53

use clap::Parser;
use sitedeploy_cli::commands::{self, Cli};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used with `--debug`
const DEBUG_FILTER: &str = "sitedeploy=debug,sitedeploy_cli=debug,sitedeploy_core=debug,sitedeploy_aws=debug";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::from_default_env()
    };

    // Logs go to stderr; stdout carries command output only.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
