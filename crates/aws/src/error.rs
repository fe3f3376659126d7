//! Mapping of SDK failures onto `sitedeploy_core::Error`
//!
//! Provider errors keep the full SDK message; only the variant is chosen from
//! the service error code so the CLI can pick an exit code.

use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::SdkError;
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use sitedeploy_core::Error;

/// Classify any SDK error from S3 or Route 53
pub(crate) fn classify<E, R>(err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => Error::Network(message),
        _ => match err.code() {
            Some(code) => from_code(code, message),
            None => Error::Provider(message),
        },
    }
}

/// Pick an error variant for a service error code
pub(crate) fn from_code(code: &str, message: String) -> Error {
    match code {
        "AccessDenied" | "AccessDeniedException" | "InvalidAccessKeyId" | "InvalidClientTokenId"
        | "SignatureDoesNotMatch" | "ExpiredToken" | "Forbidden" => Error::Auth(message),
        "NotFound" | "NoSuchBucket" | "NoSuchKey" | "NoSuchBucketPolicy" | "NoSuchHostedZone" => {
            Error::NotFound(message)
        }
        "BucketAlreadyOwnedByYou" => Error::BucketAlreadyOwned(message),
        "BucketAlreadyExists" | "HostedZoneAlreadyExists" | "ConflictingDomainExists"
        | "OperationAborted" | "PriorRequestNotComplete" => Error::Conflict(message),
        "RequestTimeout" | "SlowDown" | "ServiceUnavailable" | "Throttling" | "InternalError" => {
            Error::Network(message)
        }
        _ => Error::Provider(message),
    }
}

/// Whether S3 answered with a redirect to the bucket's own region
///
/// Bucket-level calls against another region's endpoint are redirected
/// rather than followed. HeadBucket carries no body, so only the status
/// identifies it.
pub(crate) fn is_region_redirect<E>(err: &SdkError<E, HttpResponse>) -> bool
where
    E: ProvideErrorMetadata,
{
    redirects(err.raw_response().map(|r| r.status().as_u16()), err.code())
}

fn redirects(status: Option<u16>, code: Option<&str>) -> bool {
    status == Some(301) || code == Some("PermanentRedirect")
}

/// Error for a request the SDK refused to build
pub(crate) fn build_error(err: aws_smithy_types::error::operation::BuildError) -> Error {
    Error::General(err.to_string())
}
