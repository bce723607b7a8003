//! Publish build and telemetry artifacts to S3.
//!
//! Each artifact gets a MIME type, a short-lived pre-signed PUT URL minted
//! from the bucket's static credentials, and one streamed HTTP PUT over a
//! session shared by the whole run. Batches go through [`tasks`], which
//! waits for every upload before reporting.

pub mod config;
pub mod constants;
pub mod logging;
pub mod mime;
pub mod s3;
pub mod session;
pub mod tasks;

pub use config::{BucketConfig, BucketCredentials, PublishConfig, Settings};
pub use mime::MimeResolver;
pub use s3::{PublishError, UploadContext, publish_artifacts, put_file, upload_to_s3};
pub use session::{build_session, with_session};
pub use tasks::{ErrorPolicy, TaskOutcome, process_future_results, raise_future_errors};
