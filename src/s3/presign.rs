use aws_sdk_s3::{Client, presigning::PresigningConfig};
use std::time::Duration;
use tracing::debug;

use super::error::{PublishError, Result};

/// AWS caps pre-signed URLs at 7 days
const MAX_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Generate a pre-signed PUT URL
///
/// # Arguments
///
/// * `client` - AWS S3 client
/// * `bucket` - S3 bucket name
/// * `s3_key` - S3 object key
/// * `content_type` - Content-Type the upload must carry
/// * `expires_in` - URL lifetime, capped at 7 days
///
/// # Returns
///
/// Pre-signed URL as a string
pub async fn generate_presigned_put_url(
    client: &Client,
    bucket: &str,
    s3_key: &str,
    content_type: &str,
    expires_in: Duration,
) -> Result<String> {
    let presigning_config = PresigningConfig::expires_in(expires_in.min(MAX_EXPIRY))
        .map_err(PublishError::from_aws_error)?;

    let presigned_request = client
        .put_object()
        .bucket(bucket)
        .key(s3_key)
        .content_type(content_type)
        .presigned(presigning_config)
        .await
        .map_err(PublishError::from_aws_error)?;

    debug!(
        "Presigned PUT for s3://{}/{} valid for {}s",
        bucket,
        s3_key,
        expires_in.min(MAX_EXPIRY).as_secs()
    );

    Ok(presigned_request.uri().to_string())
}
