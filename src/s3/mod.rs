pub mod client;
pub mod error;
pub mod presign;
pub mod publish;
pub mod upload;

pub use client::S3Client;
pub use error::{PublishError, Result};
pub use presign::generate_presigned_put_url;
pub use publish::{UploadContext, publish_artifacts, upload_headers, upload_to_s3};
pub use upload::put_file;
