//! sync command - Upload a local directory to a bucket
//!
//! Every regular file under the directory is uploaded with its relative path
//! as the key. Files are uploaded one at a time; the first failure stops the
//! sync. Prints the bucket's website URL when done.

use std::fmt;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use sitedeploy_core::Bucket;

use super::{Context, report};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, ProgressBar};

/// Upload a local directory to a bucket
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Local directory to upload (`~` is expanded)
    pub pathname: PathBuf,

    /// Destination bucket
    pub bucket: String,
}

#[derive(Debug, Serialize)]
struct SyncOutput {
    bucket: String,
    uploaded: usize,
    url: String,
}

impl fmt::Display for SyncOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Execute the sync command
pub async fn execute(args: SyncArgs, ctx: &Context, formatter: &Formatter) -> ExitCode {
    let progress = ProgressBar::spinner(formatter.config(), &format!("Syncing to {}", args.bucket));

    let result = ctx
        .buckets
        .sync(&args.pathname, &args.bucket, |key| {
            progress.set_message(&format!("Uploading {key}"));
        })
        .await;
    progress.finish_and_clear();

    let uploaded = match result {
        Ok(uploaded) => uploaded,
        Err(e) => return report(formatter, &e),
    };

    let bucket = Bucket::new(&args.bucket);
    match ctx.buckets.get_bucket_url(&bucket).await {
        Ok(url) => {
            formatter.output(&SyncOutput {
                bucket: bucket.name,
                uploaded,
                url,
            });
            ExitCode::Success
        }
        Err(e) => report(formatter, &e),
    }
}
