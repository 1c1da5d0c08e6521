//! ARSO HTTP client.
//!
//! One `reqwest::Client` with an explicit timeout, shared by both fetch
//! routines. Upstream status codes are deliberately not checked: an error
//! page simply contains no bulletin rows or no decodable observation, and
//! degrades the same way an empty document would.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::error::ArsoError;
use super::types::{ObservationDoc, Quake, Station};
use super::{quakes, stations};

/// Earthquake bulletin page.
const DEFAULT_BULLETIN_URL: &str = "http://www.arso.gov.si/potresi/obvestila%20o%20potresih/aip/";

/// Observation index page listing one XML feed per station.
const DEFAULT_INDEX_URL: &str =
    "http://meteo.arso.gov.si/uploads/probase/www/observ/surface/text/sl/observation_si/index.html";

/// Host the index page's relative feed hrefs resolve against.
const DEFAULT_FEED_BASE_URL: &str = "http://meteo.arso.gov.si/";

/// Default cap on concurrent station feed fetches.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the ARSO client.
#[derive(Debug, Clone)]
pub struct ArsoConfig {
    /// Earthquake bulletin URL.
    pub bulletin_url: String,
    /// Station index URL.
    pub index_url: String,
    /// Base URL feed hrefs are resolved against.
    pub feed_base_url: String,
    /// Cap on concurrent station feed fetches.
    pub max_concurrent: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ArsoConfig {
    fn default() -> Self {
        Self {
            bulletin_url: DEFAULT_BULLETIN_URL.to_string(),
            index_url: DEFAULT_INDEX_URL.to_string(),
            feed_base_url: DEFAULT_FEED_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }
}

impl ArsoConfig {
    /// Set a custom bulletin URL (for testing).
    pub fn with_bulletin_url(mut self, url: impl Into<String>) -> Self {
        self.bulletin_url = url.into();
        self
    }

    /// Set a custom index URL (for testing).
    pub fn with_index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = url.into();
        self
    }

    /// Set a custom feed base URL (for testing).
    pub fn with_feed_base_url(mut self, url: impl Into<String>) -> Self {
        self.feed_base_url = url.into();
        self
    }

    /// Set the concurrent fetch cap.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for ARSO's published earthquake and observation documents.
#[derive(Debug, Clone)]
pub struct ArsoClient {
    http: reqwest::Client,
    config: ArsoConfig,
}

impl ArsoClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ArsoConfig) -> Result<Self, ArsoError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch and parse the earthquake bulletin.
    ///
    /// One outbound fetch per call, no retries. Rows appear in document
    /// order; filtering rules live in the bulletin parser.
    pub async fn fetch_quakes(&self) -> Result<Vec<Quake>, ArsoError> {
        let body = self
            .http
            .get(&self.config.bulletin_url)
            .send()
            .await?
            .text()
            .await?;

        quakes::parse_bulletin(&body)
    }

    /// Fetch the station index and every discovered observation feed.
    ///
    /// Feeds are fetched with bounded concurrency through an ordered
    /// buffered stream, so the output preserves discovery order. A failed
    /// fetch of a single feed skips that station and is logged; it never
    /// affects the rest of the scan.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, ArsoError> {
        let body = self
            .http
            .get(&self.config.index_url)
            .send()
            .await?
            .text()
            .await?;

        let links = stations::extract_feed_links(&body)?;

        let found = stream::iter(links)
            .map(|href| {
                let feed_url = format!(
                    "{}{}",
                    self.config.feed_base_url,
                    href.trim_start_matches('/')
                );
                async move {
                    match self.fetch_observation(&feed_url).await {
                        Ok(doc) => stations::build_station(doc, &feed_url),
                        Err(e) => {
                            warn!(url = %feed_url, error = %e, "station feed fetch failed, skipping");
                            None
                        }
                    }
                }
            })
            .buffered(self.config.max_concurrent.max(1))
            .filter_map(|station| async move { station })
            .collect()
            .await;

        Ok(found)
    }

    /// Fetch all stations and return the one whose token matches, if any.
    ///
    /// This re-scans the whole index on every call; the response cache in
    /// front of the lookup route is what keeps that affordable.
    pub async fn fetch_station(&self, token: &str) -> Result<Option<Station>, ArsoError> {
        let stations = self.fetch_stations().await?;
        Ok(stations.into_iter().find(|s| s.id == token))
    }

    /// Fetch one observation feed and decode it leniently.
    ///
    /// An undecodable body becomes a default (zero-valued) document, which
    /// the record assembly then discards for its empty title.
    async fn fetch_observation(&self, url: &str) -> Result<ObservationDoc, ArsoError> {
        let body = self.http.get(url).send().await?.text().await?;

        Ok(quick_xml::de::from_str(&body).unwrap_or_else(|e| {
            debug!(url, error = %e, "undecodable observation document");
            ObservationDoc::default()
        }))
    }
}
