//! Provider session
//!
//! Resolves credentials and region once per invocation and hands out clients
//! that share the resulting SDK configuration.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use sitedeploy_core::SessionOptions;
use sitedeploy_core::session::DEFAULT_REGION;

use crate::route53::Route53Dns;
use crate::s3::S3Storage;

/// Loaded AWS configuration shared by the S3 and Route 53 clients
#[derive(Debug, Clone)]
pub struct Session {
    config: SdkConfig,
}

impl Session {
    /// Resolve credentials and region for the selected profile
    ///
    /// Unset options fall through to the SDK default provider chain.
    pub async fn load(options: &SessionOptions) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = &options.profile {
            tracing::debug!(profile = %profile, "using named profile");
            loader = loader.profile_name(profile);
        }

        if let Some(region) = &options.region {
            loader = loader.region(Region::new(region.clone()));
        }

        Self::from_sdk_config(loader.load().await)
    }

    /// Wrap an already loaded SDK configuration
    pub fn from_sdk_config(config: SdkConfig) -> Self {
        Self { config }
    }

    /// Region of the session, `us-east-1` if none could be resolved
    pub fn region_name(&self) -> &str {
        self.config
            .region()
            .map(|r| r.as_ref())
            .unwrap_or(DEFAULT_REGION)
    }

    /// S3 storage backend bound to this session
    pub fn storage(&self) -> S3Storage {
        S3Storage::new(&self.config)
    }

    /// Route 53 backend bound to this session
    pub fn dns(&self) -> Route53Dns {
        Route53Dns::new(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_name_defaults() {
        let session = Session::from_sdk_config(SdkConfig::builder().build());
        assert_eq!(session.region_name(), "us-east-1");
    }

    #[test]
    fn test_region_name_from_config() {
        let config = SdkConfig::builder()
            .region(Region::new("eu-west-1"))
            .build();
        let session = Session::from_sdk_config(config);
        assert_eq!(session.region_name(), "eu-west-1");
    }
}
