//! S3 storage backend
//!
//! Wraps aws-sdk-s3 and implements the `StorageBackend` trait from
//! sitedeploy-core.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, ErrorDocument, IndexDocument,
    WebsiteConfiguration,
};
use sitedeploy_core::session::DEFAULT_REGION;
use sitedeploy_core::{BucketInfo, Error, ObjectInfo, ObjectPage, Result, StorageBackend};

use crate::error::{build_error, classify, is_region_redirect};

/// S3 client wrapper
#[derive(Debug, Clone)]
pub struct S3Storage {
    inner: aws_sdk_s3::Client,
}

impl S3Storage {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            inner: aws_sdk_s3::Client::new(config),
        }
    }
}

fn timestamp(dt: &aws_sdk_s3::primitives::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::from_second(dt.secs()).ok()
}

#[async_trait]
impl StorageBackend for S3Storage {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        tracing::debug!("ListBuckets");
        let response = self.inner.list_buckets().send().await.map_err(classify)?;

        let buckets = response
            .buckets()
            .iter()
            .map(|b| BucketInfo {
                name: b.name().unwrap_or_default().to_string(),
                created: b.creation_date().and_then(timestamp),
            })
            .collect();

        Ok(buckets)
    }

    async fn list_objects(&self, bucket: &str, continuation_token: Option<String>) -> Result<ObjectPage> {
        tracing::debug!(bucket, "ListObjectsV2");
        let response = self
            .inner
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(continuation_token)
            .send()
            .await
            .map_err(classify)?;

        let items = response
            .contents()
            .iter()
            .map(|object| {
                let mut info = ObjectInfo::new(object.key().unwrap_or_default(), object.size().unwrap_or(0));
                info.last_modified = object.last_modified().and_then(timestamp);
                info.etag = object.e_tag().map(|etag| etag.trim_matches('"').to_string());
                info
            })
            .collect();

        let continuation_token = if response.is_truncated().unwrap_or(false) {
            response.next_continuation_token().map(|s| s.to_string())
        } else {
            None
        };

        Ok(ObjectPage {
            items,
            continuation_token,
        })
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        tracing::debug!(bucket, "HeadBucket");
        match self.inner.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) if is_region_redirect(&e) => {
                tracing::debug!(bucket, "bucket lives in another region");
                Ok(true)
            }
            Err(e) => match classify(e) {
                Error::NotFound(_) => Ok(false),
                other => Err(other),
            },
        }
    }

    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<()> {
        tracing::debug!(bucket, region, "CreateBucket");
        let mut request = self.inner.create_bucket().bucket(bucket);

        // us-east-1 is the implicit default and is rejected as a constraint.
        if region != DEFAULT_REGION {
            let configuration = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build();
            request = request.create_bucket_configuration(configuration);
        }

        request.send().await.map_err(|e| {
            if e.as_service_error()
                .is_some_and(|err| err.is_bucket_already_owned_by_you())
            {
                Error::BucketAlreadyOwned(bucket.to_string())
            } else {
                classify(e)
            }
        })?;

        Ok(())
    }

    async fn bucket_location(&self, bucket: &str) -> Result<Option<String>> {
        tracing::debug!(bucket, "GetBucketLocation");
        let response = self
            .inner
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(classify)?;

        Ok(response
            .location_constraint()
            .map(|c| c.as_str().to_string()))
    }

    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<()> {
        tracing::debug!(bucket, "PutBucketPolicy");
        self.inner
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy)
            .send()
            .await
            .map_err(classify)?;

        Ok(())
    }

    async fn put_bucket_website(
        &self,
        bucket: &str,
        index_document: &str,
        error_document: &str,
    ) -> Result<()> {
        tracing::debug!(bucket, index_document, error_document, "PutBucketWebsite");
        let configuration = WebsiteConfiguration::builder()
            .index_document(
                IndexDocument::builder()
                    .suffix(index_document)
                    .build()
                    .map_err(build_error)?,
            )
            .error_document(
                ErrorDocument::builder()
                    .key(error_document)
                    .build()
                    .map_err(build_error)?,
            )
            .build();

        self.inner
            .put_bucket_website()
            .bucket(bucket)
            .website_configuration(configuration)
            .send()
            .await
            .map_err(classify)?;

        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        tracing::debug!(bucket, key, size = body.len(), "PutObject");
        self.inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(classify)?;

        Ok(())
    }
}
