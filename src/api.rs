//! Synchronous client for an uptime monitor's **measurement endpoint**.
//!
//! The endpoint answers a plain `GET` with a JSON body of the shape
//! `{ "data": [ { "loc": "sydney", "data": [ { "time", "transfer", "connect" }, ... ] }, ... ] }`.
//!
//! ### Notes
//! - Any non-2xx status is an error carrying the status text; the body is not read.
//! - No retry. A failed fetch leaves the charts as they are.
//!
//! Typical usage:
//! ```no_run
//! # use uptime_charts::Client;
//! let client = Client::new()?;
//! let results = client.fetch("https://example.com/api/isitup")?;
//! println!("{} locations", results.data.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::models::FetchResult;
use log::debug;
use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("request failed with HTTP {code}: {text}")]
    Status { code: u16, text: String },
    #[error("decode json: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Build a client with the default timeouts (30s total, 10s connect, 5 redirects).
    pub fn new() -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("uptime_charts/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Network)?;
        Ok(Self { http })
    }

    /// Wrap an already configured `reqwest` client.
    pub fn with_http(http: HttpClient) -> Self {
        Self { http }
    }

    /// Fetch and decode the measurement document at `url`.
    ///
    /// ### Errors
    /// - `Network`: connection or transport failure
    /// - `Status`: the server answered with a non-2xx status
    /// - `Decode`: the body is not JSON of the expected shape
    pub fn fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        debug!("GET {url}");
        let resp = self.http.get(url).send().map_err(FetchError::Network)?;
        let resp = check_status(resp)?;
        resp.json::<FetchResult>().map_err(FetchError::Decode)
    }
}

/// Pass 2xx responses through; everything else becomes `FetchError::Status`.
fn check_status(resp: Response) -> Result<Response, FetchError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string());
    Err(FetchError::Status {
        code: status.as_u16(),
        text,
    })
}
