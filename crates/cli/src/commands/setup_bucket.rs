//! setup-bucket command
//!
//! Creates the bucket (or reuses one the caller already owns), makes it
//! publicly readable and enables website hosting.

use clap::Args;
use serde::Serialize;
use sitedeploy_core::deploy;

use super::{Context, report};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Create a bucket and configure it for website hosting
#[derive(Args, Debug)]
pub struct SetupBucketArgs {
    /// Bucket name, usually the domain the site is served from
    pub bucket: String,
}

#[derive(Debug, Serialize)]
struct SetupBucketOutput {
    status: &'static str,
    bucket: String,
}

/// Execute the setup-bucket command
pub async fn execute(args: SetupBucketArgs, ctx: &Context, formatter: &Formatter) -> ExitCode {
    match deploy::setup_bucket(&ctx.buckets, &args.bucket).await {
        Ok(bucket) => {
            // Human mode stays silent on success.
            if formatter.is_json() {
                formatter.json(&SetupBucketOutput {
                    status: "success",
                    bucket: bucket.name,
                });
            }
            ExitCode::Success
        }
        Err(e) => report(formatter, &e),
    }
}
