use reqwest::Client;
use std::future::Future;
use tracing::debug;

use crate::s3::Result;

/// Build the HTTP session shared by every upload of a run
pub fn build_session() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Run `main` with a fresh session, closing it once `main` finishes
pub async fn with_session<F, Fut, T>(main: F) -> Result<T>
where
    F: FnOnce(Client) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let session = build_session()?;
    debug!("HTTP session opened");

    let result = main(session).await;

    debug!("HTTP session closed");
    result
}
