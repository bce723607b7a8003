use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::path::{Path, PathBuf};
use tracing::info;

use super::client::S3Client;
use super::error::{PublishError, Result};
use super::presign::generate_presigned_put_url;
use super::upload::put_file;
use crate::config::{PublishConfig, Settings};
use crate::constants::{CACHE_CONTROL_MAXAGE, PRESIGNED_URL_EXPIRY, TELEMETRY_PURPOSE};
use crate::mime::MimeResolver;
use crate::tasks::{ErrorPolicy, TaskOutcome, process_future_results};

/// Everything an upload needs apart from the HTTP session
#[derive(Debug, Clone)]
pub struct UploadContext {
    pub config: PublishConfig,
    /// Bucket identifier selecting an entry of `config.bucket_config`
    pub bucket: String,
    pub dry_run: bool,
    pub resolver: MimeResolver,
}

impl UploadContext {
    pub fn new(config: PublishConfig, bucket: impl Into<String>, dry_run: bool) -> Self {
        Self {
            config,
            bucket: bucket.into(),
            dry_run,
            resolver: MimeResolver::default(),
        }
    }

    /// Load the bucket configuration named by `settings`
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let config = PublishConfig::from_path(&settings.config_path)?;
        Ok(Self::new(config, settings.bucket.clone(), settings.dry_run))
    }

    pub fn with_resolver(mut self, resolver: MimeResolver) -> Self {
        self.resolver = resolver;
        self
    }
}

/// Headers sent with every artifact PUT
pub fn upload_headers(mime_type: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(mime_type)?);
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_str(&format!("public, max-age={}", CACHE_CONTROL_MAXAGE))?,
    );
    Ok(headers)
}

/// Upload `local_path` to the telemetry bucket under `s3_key`.
///
/// In dry-run mode everything up to and including URL generation happens,
/// but nothing is sent.
pub async fn upload_to_s3(
    ctx: &UploadContext,
    session: &Client,
    s3_key: &str,
    local_path: &Path,
) -> Result<()> {
    let mime_type = ctx.resolver.resolve(local_path)?;

    let bucket_config = ctx.config.bucket(&ctx.bucket)?;
    let bucket = bucket_config.bucket_for(&ctx.bucket, TELEMETRY_PURPOSE)?;
    let headers = upload_headers(&mime_type)?;

    let s3 = S3Client::new(bucket_config, bucket);
    let url = generate_presigned_put_url(
        s3.client(),
        s3.bucket(),
        s3_key,
        &mime_type,
        PRESIGNED_URL_EXPIRY,
    )
    .await?;

    info!(
        "upload_to_s3: {} -> s3://{}/{}",
        local_path.display(),
        s3.bucket(),
        s3_key
    );

    if ctx.dry_run {
        return Ok(());
    }

    put_file(session, &url, headers, local_path).await?;
    Ok(())
}

/// Upload every `(s3_key, local_path)` pair concurrently.
///
/// Succeeded entries carry the key that was written. Under
/// [`ErrorPolicy::AbortOnFirst`] the first failure (in submission order) is
/// returned once all uploads have finished.
pub async fn publish_artifacts(
    ctx: &UploadContext,
    session: &Client,
    artifacts: &[(String, PathBuf)],
    policy: ErrorPolicy,
) -> Result<TaskOutcome<String, PublishError>> {
    let tasks = artifacts.iter().map(|(s3_key, local_path)| async move {
        upload_to_s3(ctx, session, s3_key, local_path).await?;
        Ok::<_, PublishError>(s3_key.clone())
    });

    let outcome = process_future_results(tasks, policy).await?;

    info!(
        "published {} artifact(s), {} failed",
        outcome.succeeded.len(),
        outcome.failed.len()
    );

    Ok(outcome)
}
