//! setup-domain command
//!
//! Points a domain at the website endpoint of the bucket with the same name,
//! creating a hosted zone first when none serves the domain.

use std::fmt;

use clap::Args;
use serde::Serialize;
use sitedeploy_core::deploy;

use super::{Context, report};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Point a domain at its website bucket
#[derive(Args, Debug)]
pub struct SetupDomainArgs {
    /// Domain name; a bucket with this name must already exist
    pub domain: String,
}

#[derive(Debug, Serialize)]
struct SetupDomainOutput {
    status: &'static str,
    domain: String,
    url: String,
}

impl fmt::Display for SetupDomainOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Domain configured: {}", self.url)
    }
}

/// Execute the setup-domain command
pub async fn execute(args: SetupDomainArgs, ctx: &Context, formatter: &Formatter) -> ExitCode {
    match deploy::setup_domain(&ctx.buckets, &ctx.domains, &args.domain).await {
        Ok(url) => {
            formatter.output(&SetupDomainOutput {
                status: "success",
                domain: args.domain,
                url,
            });
            ExitCode::Success
        }
        Err(e) => report(formatter, &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_display() {
        let output = SetupDomainOutput {
            status: "success",
            domain: "example.com".to_string(),
            url: "http://example.com".to_string(),
        };
        assert_eq!(output.to_string(), "Domain configured: http://example.com");

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["url"], "http://example.com");
        assert_eq!(json["status"], "success");
    }
}
