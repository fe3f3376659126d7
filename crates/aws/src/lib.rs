//! sitedeploy-aws: AWS SDK adapter for sitedeploy
//!
//! This crate implements the `StorageBackend` and `DnsBackend` traits from
//! sitedeploy-core using aws-sdk-s3 and aws-sdk-route53. It is the only crate
//! that directly depends on the AWS SDK.

mod error;
pub mod route53;
pub mod s3;
pub mod session;

pub use route53::Route53Dns;
pub use s3::S3Storage;
pub use session::Session;
