//! Page fetching.
//!
//! The rest of the crate only knows about [PageFetcher], so that
//! tests (and callers with their own HTTP stack) can provide pages from elsewhere.
//! [Downloader] is the blocking HTTP implementation.
use std::time::Duration;

use log::debug;
use url::Url;

use crate::error::Error;

/// Retrieves the markup of a page.
///
/// Any non-success status must be reported as an error.
pub trait PageFetcher: Send + Sync {
    fn fetch_page(&self, url: &Url) -> Result<String, Error>;
}

/// holds the http client that will make the requests.
pub struct Downloader {
    client: reqwest::blocking::Client,
}

impl Downloader {
    /// Build a client sending `user_agent`, with a per-request `timeout`.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for Downloader {
    fn fetch_page(&self, url: &Url) -> Result<String, Error> {
        debug!("downloading {}", url);
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }
}
