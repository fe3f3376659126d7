//! list-bucket-objects command
//!
//! Prints every object key in a bucket, following pagination.

use std::pin::pin;

use clap::Args;
use futures::TryStreamExt;
use serde::Serialize;
use sitedeploy_core::ObjectInfo;

use super::{Context, report};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// List the objects in a bucket
#[derive(Args, Debug)]
pub struct ListBucketObjectsArgs {
    /// Bucket name
    pub bucket: String,
}

#[derive(Debug, Serialize)]
struct ListObjectsOutput {
    bucket: String,
    items: Vec<ObjectInfo>,
}

/// Execute the list-bucket-objects command
pub async fn execute(args: ListBucketObjectsArgs, ctx: &Context, formatter: &Formatter) -> ExitCode {
    if formatter.is_json() {
        return match ctx.buckets.all_objects(&args.bucket).try_collect().await {
            Ok(items) => {
                formatter.json(&ListObjectsOutput {
                    bucket: args.bucket,
                    items,
                });
                ExitCode::Success
            }
            Err(e) => report(formatter, &e),
        };
    }

    let mut objects = pin!(ctx.buckets.all_objects(&args.bucket));
    loop {
        match objects.try_next().await {
            Ok(Some(object)) => formatter.println(&object.key),
            Ok(None) => return ExitCode::Success,
            Err(e) => return report(formatter, &e),
        }
    }
}
