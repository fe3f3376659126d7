//! CLI command definitions and execution
//!
//! Every invocation runs exactly one command. The AWS session and both
//! managers are built once in [`Context::new`] and handed to the command.

use clap::{Parser, Subcommand};
use sitedeploy_aws::{Route53Dns, S3Storage, Session};
use sitedeploy_core::endpoint::known_region;
use sitedeploy_core::walk::resolve_root;
use sitedeploy_core::{BucketManager, ConfigManager, DomainManager, Error, SessionOptions};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
mod list_bucket_objects;
mod list_buckets;
mod setup_bucket;
mod setup_domain;
mod sync;

/// sitedeploy - static website deployment to S3 and Route 53
///
/// Creates website buckets, uploads a local directory into them and points a
/// domain at the bucket endpoint.
#[derive(Parser, Debug)]
#[command(name = "sitedeploy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Credential profile to use
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Region to use for new buckets and API calls
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all buckets
    ListBuckets,

    /// List the objects in a bucket
    ListBucketObjects(list_bucket_objects::ListBucketObjectsArgs),

    /// Create a bucket and configure it for website hosting
    SetupBucket(setup_bucket::SetupBucketArgs),

    /// Upload a local directory to a bucket
    Sync(sync::SyncArgs),

    /// Point a domain at its website bucket
    SetupDomain(setup_domain::SetupDomainArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Managers shared by all commands of one invocation
pub struct Context {
    pub buckets: BucketManager<S3Storage>,
    pub domains: DomainManager<Route53Dns>,
}

impl Context {
    /// Load the AWS session and bind both managers to it
    pub async fn new(options: &SessionOptions) -> Self {
        let session = Session::load(options).await;
        tracing::debug!(region = session.region_name(), "session loaded");

        Self {
            buckets: BucketManager::new(session.storage(), session.region_name()),
            domains: DomainManager::new(session.dns()),
        }
    }
}

/// Print `err` and map it to its exit code
pub(crate) fn report(formatter: &Formatter, err: &Error) -> ExitCode {
    formatter.error(&err.to_string());
    ExitCode::from_error(err)
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };
    let formatter = Formatter::new(output_config);

    if let Commands::Completions(args) = cli.command {
        return completions::execute(args);
    }

    // Reject a missing or non-directory sync root before any session is loaded.
    if let Commands::Sync(args) = &cli.command
        && let Err(e) = resolve_root(&args.pathname)
    {
        return report(&formatter, &e);
    }

    let config = match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return ExitCode::from_error(&e);
        }
    };

    let options = config.session_options(cli.profile, cli.region);
    if let Some(region) = &options.region
        && !known_region(region)
    {
        formatter.warning(&format!(
            "Region '{region}' has no known website endpoint; setup-domain will fail for buckets there"
        ));
    }

    let ctx = Context::new(&options).await;

    match cli.command {
        Commands::ListBuckets => list_buckets::execute(&ctx, &formatter).await,
        Commands::ListBucketObjects(args) => list_bucket_objects::execute(args, &ctx, &formatter).await,
        Commands::SetupBucket(args) => setup_bucket::execute(args, &ctx, &formatter).await,
        Commands::Sync(args) => sync::execute(args, &ctx, &formatter).await,
        Commands::SetupDomain(args) => setup_domain::execute(args, &ctx, &formatter).await,
        Commands::Completions(_) => ExitCode::Success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsString;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from([
            "sitedeploy",
            "--profile",
            "personal",
            "--region",
            "eu-west-1",
            "list-buckets",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.profile.as_deref(), Some("personal"));
        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::ListBuckets));
    }

    #[test]
    fn test_parse_sync() {
        let cli = Cli::try_parse_from(["sitedeploy", "sync", "./site", "example.com"]).unwrap();
        match cli.command {
            Commands::Sync(args) => {
                assert_eq!(args.pathname, std::path::PathBuf::from("./site"));
                assert_eq!(args.bucket, "example.com");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_requires_arguments() {
        assert!(Cli::try_parse_from(["sitedeploy", "setup-bucket"]).is_err());
        assert!(Cli::try_parse_from(["sitedeploy", "sync", "./site"]).is_err());
        assert!(Cli::try_parse_from(["sitedeploy", "setup-domain"]).is_err());
        assert!(Cli::try_parse_from(["sitedeploy", "list-bucket-objects"]).is_err());
    }

    #[test]
    fn test_profile_defaults_to_none() {
        let cli = Cli::try_parse_from(["sitedeploy", "setup-domain", "example.com"]).unwrap();
        assert!(cli.profile.is_none());
        assert!(cli.region.is_none());
    }

    #[tokio::test]
    async fn test_missing_sync_path_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let args: Vec<OsString> = vec![
            "sitedeploy".into(),
            "--quiet".into(),
            "sync".into(),
            missing.into_os_string(),
            "example.com".into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(execute(cli).await, ExitCode::UsageError);
    }
}
