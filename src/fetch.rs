//! Page download.
//!
//! One GET per source, no retry. Anything other than a 2xx response is an
//! [`Error::Fetch`].

use crate::error::{Error, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Something that can turn a URL into page markup.
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`Fetch`] over a shared `reqwest` client with library-default headers.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

/// Build the `reqwest` client shared by page fetches and the classifier.
///
/// `timeout` of `None` keeps the transport default.
pub fn http_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

impl HttpFetcher {
    /// Build a fetcher over [`http_client`].
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
        })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(%status, elapsed_ms = t0.elapsed().as_millis() as u64, "Non-success response");
            return Err(Error::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let body = response.text().await?;
        info!(
            %status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
