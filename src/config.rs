//! Acquisition parameters.
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::Error;

/// Parameters of a corpus build.
///
/// [Config::default] mirrors a 40-page crawl of the most starred repositories.
#[derive(Debug, Clone)]
pub struct Config {
    /// root of the code host, joined with repository identifiers
    pub base_url: String,
    /// number of search result pages to walk
    pub page_count: usize,
    /// number of trailing identifiers kept per search page
    pub window: usize,
    /// search query (`q` parameter)
    pub search_query: String,
    /// search ordering (`s` parameter)
    pub search_sort: String,
    /// snapshot location
    pub cache_path: PathBuf,
    /// reuse an existing snapshot instead of building a new one
    pub use_cache: bool,
    pub user_agent: String,
    /// per-request timeout
    pub timeout: Duration,
    /// size of the fetch/normalization thread pool
    pub workers: usize,
}

impl Config {
    /// Parsed [Config::base_url].
    pub fn base_url(&self) -> Result<Url, Error> {
        Ok(Url::parse(&self.base_url)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://github.com/".to_string(),
            page_count: 40,
            window: 10,
            search_query: "stars:>0".to_string(),
            search_sort: "stars".to_string(),
            cache_path: PathBuf::from("repositories.json"),
            use_cache: true,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            workers: 4,
        }
    }
}
