//! sitedeploy-core: Core library for the sitedeploy static site deployer
//!
//! This crate provides the provider-independent parts of sitedeploy:
//! - Configuration and session selection
//! - Backend traits for object storage and DNS
//! - `BucketManager` and `DomainManager`
//! - Website endpoint lookup and the local directory walk
//!
//! Nothing here depends on a cloud SDK; the AWS adapter lives in
//! `sitedeploy-aws`.

pub mod bucket;
pub mod config;
pub mod deploy;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod session;
pub mod traits;
pub mod walk;

pub use bucket::BucketManager;
pub use config::{Config, ConfigManager};
pub use domain::DomainManager;
pub use endpoint::{Endpoint, get_endpoint};
pub use error::{Error, Result};
pub use session::SessionOptions;
pub use traits::{
    AliasRecord, Bucket, BucketInfo, DnsBackend, HostedZone, ObjectInfo, ObjectPage,
    StorageBackend, ZonePage,
};
