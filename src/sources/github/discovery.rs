//! Repository identifier discovery.
//!
//! Walks pages `0..page_count` of the ranked search listing, and keeps the trailing
//! [Config::window] identifier elements of each page: earlier matches of the
//! selector belong to the page header and navigation.
//!
//! Pages that fail are skipped and listed in [Discovery::failed_pages].
use log::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::download::PageFetcher;
use crate::error::Error;
use crate::markup::Markup;

/// Class of the elements holding repository identifiers on a search page.
pub const IDENTIFIER_SELECTOR: &str = "v-align-middle";

/// Result of a discovery walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    identifiers: Vec<String>,
    pages_requested: usize,
    failed_pages: Vec<usize>,
}

impl Discovery {
    /// Identifiers in page order, then position order.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn into_identifiers(self) -> Vec<String> {
        self.identifiers
    }

    pub fn pages_requested(&self) -> usize {
        self.pages_requested
    }

    /// Indices of pages that could not be fetched.
    pub fn failed_pages(&self) -> &[usize] {
        &self.failed_pages
    }
}

/// Url of the search listing page `page`.
pub fn search_url(config: &Config, base: &Url, page: usize) -> Result<Url, Error> {
    let mut url = base.join("search")?;
    url.query_pairs_mut()
        .append_pair("p", &page.to_string())
        .append_pair("q", &config.search_query)
        .append_pair("s", &config.search_sort)
        .append_pair("type", "Repositories");
    Ok(url)
}

/// Get the last `window` identifier elements of a search page.
///
/// Elements with blank text are dropped after windowing.
pub fn extract_identifiers(raw: &str, window: usize) -> Vec<String> {
    let markup = Markup::parse(raw);
    let matches = markup.find_all(IDENTIFIER_SELECTOR);
    let skip = matches.len().saturating_sub(window);
    matches
        .iter()
        .skip(skip)
        .map(|element| element.text().trim().to_string())
        .filter(|identifier| !identifier.is_empty())
        .collect()
}

/// Fetch `page_count` search pages, one at a time, and collect identifiers.
///
/// Only an invalid base url is an error: unreachable pages are skipped.
pub fn discover(
    fetcher: &dyn PageFetcher,
    config: &Config,
    page_count: usize,
) -> Result<Discovery, Error> {
    let base = config.base_url()?;
    let mut discovery = Discovery {
        pages_requested: page_count,
        ..Default::default()
    };

    for page in 0..page_count {
        let url = search_url(config, &base, page)?;
        match fetcher.fetch_page(&url) {
            Ok(raw) => {
                let identifiers = extract_identifiers(&raw, config.window);
                debug!("page {}: {} identifiers", page, identifiers.len());
                discovery.identifiers.extend(identifiers);
            }
            Err(e) => {
                warn!("skipping search page {}: {}", page, e);
                discovery.failed_pages.push(page);
            }
        }
    }

    info!(
        "discovered {} identifiers on {}/{} pages",
        discovery.identifiers.len(),
        page_count - discovery.failed_pages.len(),
        page_count
    );
    Ok(discovery)
}
