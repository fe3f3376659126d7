//! list-buckets command
//!
//! Prints the name of every bucket owned by the caller.

use std::pin::pin;

use futures::TryStreamExt;
use serde::Serialize;
use sitedeploy_core::BucketInfo;

use super::{Context, report};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Debug, Serialize)]
struct ListBucketsOutput {
    items: Vec<BucketInfo>,
}

/// Execute the list-buckets command
pub async fn execute(ctx: &Context, formatter: &Formatter) -> ExitCode {
    if formatter.is_json() {
        return match ctx.buckets.all_buckets().try_collect().await {
            Ok(items) => {
                formatter.json(&ListBucketsOutput { items });
                ExitCode::Success
            }
            Err(e) => report(formatter, &e),
        };
    }

    let mut buckets = pin!(ctx.buckets.all_buckets());
    loop {
        match buckets.try_next().await {
            Ok(Some(bucket)) => formatter.println(&bucket.name),
            Ok(None) => return ExitCode::Success,
            Err(e) => return report(formatter, &e),
        }
    }
}
