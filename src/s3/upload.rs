use reqwest::header::{CONTENT_LENGTH, HeaderMap};
use reqwest::{Body, Client, StatusCode};
use std::path::Path;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use super::error::{PublishError, Result};

/// PUT the bytes of `local_path` to `url`.
///
/// The file is streamed uncompressed and closed once the request finishes,
/// whatever the outcome. The response body is always read before the status
/// is checked; only 200 and 204 count as success.
pub async fn put_file(
    session: &Client,
    url: &str,
    headers: HeaderMap,
    local_path: &Path,
) -> Result<StatusCode> {
    let file = File::open(local_path).await?;
    let file_size = file.metadata().await?.len();

    // S3 rejects chunked PUTs, so the length goes out up front
    let response = session
        .put(url)
        .headers(headers)
        .header(CONTENT_LENGTH, file_size)
        .body(Body::wrap_stream(ReaderStream::new(file)))
        .send()
        .await?;

    let status = response.status();
    info!("put {}: {}", local_path.display(), status);

    let body = response.text().await?;
    if !body.is_empty() {
        debug!("{}", body);
    }

    if !matches!(status, StatusCode::OK | StatusCode::NO_CONTENT) {
        return Err(PublishError::BadStatus { status, body });
    }

    Ok(status)
}
