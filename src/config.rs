use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::s3::{self, PublishError};

const DEFAULT_REGION: &str = "us-east-1";

/// Serialization format of a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Json,
    Yaml,
}

impl FileType {
    /// Guess the format from the file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse `input` as JSON or YAML.
///
/// When `is_path` is set, `input` names a file whose contents are parsed;
/// otherwise `input` itself is the document.
pub fn load_json_or_yaml<T: DeserializeOwned>(
    input: &str,
    is_path: bool,
    file_type: FileType,
) -> Result<T> {
    let contents = if is_path {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
    } else {
        input.to_string()
    };

    let parsed = match file_type {
        FileType::Json => serde_json::from_str(&contents).map_err(anyhow::Error::from),
        FileType::Yaml => serde_yaml::from_str(&contents).map_err(anyhow::Error::from),
    };

    parsed.with_context(|| format!("Failed to load {:?}", file_type))
}

/// Access-key pair for one bucket configuration
#[derive(Clone, Deserialize)]
pub struct BucketCredentials {
    pub id: String,
    pub key: String,
}

impl fmt::Debug for BucketCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketCredentials")
            .field("id", &self.id)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Buckets and credentials behind one bucket identifier
#[derive(Debug, Clone, Deserialize)]
pub struct BucketConfig {
    /// Purpose (e.g. `telemetry`) to bucket name
    pub buckets: HashMap<String, String>,
    pub credentials: BucketCredentials,
    #[serde(default = "default_region")]
    pub region: String,
    /// S3-compatible endpoint; addressed path-style when set
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl BucketConfig {
    /// Name of the bucket serving `purpose`
    pub fn bucket_for(&self, id: &str, purpose: &str) -> s3::Result<&str> {
        self.buckets
            .get(purpose)
            .map(String::as_str)
            .ok_or_else(|| PublishError::MissingPurpose {
                bucket: id.to_string(),
                purpose: purpose.to_string(),
            })
    }
}

/// Bucket configuration for publishing
#[derive(Debug, Clone, Deserialize)]
pub struct PublishConfig {
    pub bucket_config: HashMap<String, BucketConfig>,
}

impl PublishConfig {
    /// Load and validate a JSON or YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any
    /// configured bucket name or region is invalid
    pub fn from_path(path: &Path) -> Result<Self> {
        let config: Self =
            load_json_or_yaml(&path.to_string_lossy(), true, FileType::from_path(path))?;
        config.validate()?;
        Ok(config)
    }

    /// Look up the configuration behind a bucket identifier
    pub fn bucket(&self, id: &str) -> s3::Result<&BucketConfig> {
        self.bucket_config
            .get(id)
            .ok_or_else(|| PublishError::UnknownBucket {
                bucket: id.to_string(),
            })
    }

    /// Check every region and bucket name in the configuration
    pub fn validate(&self) -> Result<()> {
        for (id, bucket) in &self.bucket_config {
            validate_region(&bucket.region)
                .with_context(|| format!("Invalid region for bucket config '{}'", id))?;
            for name in bucket.buckets.values() {
                validate_bucket_name(name)
                    .with_context(|| format!("Invalid bucket in bucket config '{}'", id))?;
            }
        }
        Ok(())
    }
}

/// Run settings taken from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub bucket: String,
    pub dry_run: bool,
}

impl Settings {
    /// Load settings from environment variables and .env file
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = lookup("TELEMETRY_CONFIG")
            .context("TELEMETRY_CONFIG not found in environment. Please set it in .env file")?;

        let bucket = lookup("TELEMETRY_BUCKET")
            .context("TELEMETRY_BUCKET not found in environment. Please set it in .env file")?;
        if bucket.is_empty() {
            anyhow::bail!("TELEMETRY_BUCKET cannot be empty");
        }

        let dry_run = match lookup("TELEMETRY_DRY_RUN") {
            Some(value) => parse_bool(&value).context("Invalid TELEMETRY_DRY_RUN")?,
            None => false,
        };

        Ok(Self {
            config_path: PathBuf::from(config_path),
            bucket,
            dry_run,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("'{}' is not a boolean", other),
    }
}

/// Validate AWS region format
fn validate_region(region: &str) -> Result<()> {
    if region.is_empty() {
        anyhow::bail!("region cannot be empty");
    }

    // Basic validation - ensure it looks like a region (contains a dash)
    if !region.contains('-') {
        anyhow::bail!(
            "region '{}' doesn't look like a valid region (e.g., us-west-2, eu-west-1)",
            region
        );
    }

    Ok(())
}

/// Validate S3 bucket name according to AWS rules
fn validate_bucket_name(bucket: &str) -> Result<()> {
    if bucket.len() < 3 || bucket.len() > 63 {
        anyhow::bail!(
            "bucket '{}' must be between 3 and 63 characters (got {})",
            bucket,
            bucket.len()
        );
    }

    let is_edge = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    if !bucket.starts_with(is_edge) || !bucket.ends_with(is_edge) {
        anyhow::bail!(
            "bucket '{}' must start and end with a lowercase letter or number",
            bucket
        );
    }

    if let Some(c) = bucket
        .chars()
        .find(|&c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' && c != '.')
    {
        anyhow::bail!(
            "bucket '{}' contains invalid character '{}'. Only lowercase letters, numbers, hyphens, and periods are allowed",
            bucket,
            c
        );
    }

    if bucket.contains("..") {
        anyhow::bail!("bucket '{}' cannot contain consecutive periods", bucket);
    }

    if bucket.split('.').all(|part| part.parse::<u8>().is_ok()) {
        anyhow::bail!("bucket '{}' cannot be formatted as an IP address", bucket);
    }

    Ok(())
}
