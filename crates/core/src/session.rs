//! Session selection
//!
//! The SDK-independent half of a provider session: which credential profile
//! and region to resolve. The AWS adapter turns this into a loaded SDK config.

/// Region assumed when neither flags, config nor the SDK chain provide one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Profile and region selection for one CLI invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Named credential profile; `None` uses the provider default chain
    pub profile: Option<String>,

    /// Region override; `None` uses the provider default chain
    pub region: Option<String>,
}
