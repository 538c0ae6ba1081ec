//! Remote Septuagint lookup.
//!
//! Fetches the two JSON documents of the LXX interlinear data set (one
//! mapping verse references to Greek text, one to Brenton English) and
//! serves lookups out of the parsed maps. The maps are fetched lazily and
//! cached for the process lifetime after the first successful load; a
//! failed load is retried on the next request.

use std::collections::HashMap;

use anyhow::{Context, Result};
use tokio::sync::OnceCell;
use tracing::info;
use vorlage_types::Passage;

pub const DEFAULT_GREEK_URL: &str =
    "https://raw.githubusercontent.com/charlesmerritt/LXX-Interlinear-Data/main/lxx_greek.json";
pub const DEFAULT_ENGLISH_URL: &str =
    "https://raw.githubusercontent.com/charlesmerritt/LXX-Interlinear-Data/main/lxx_english_brenton.json";

struct LxxMaps {
    greek: HashMap<String, String>,
    english: HashMap<String, String>,
}

/// Lazy-loading client for the remote Septuagint data set.
pub struct RemoteLxx {
    client: reqwest::Client,
    greek_url: String,
    english_url: String,
    maps: OnceCell<LxxMaps>,
}

impl RemoteLxx {
    pub fn new(greek_url: impl Into<String>, english_url: impl Into<String>) -> Self {
        RemoteLxx {
            client: reqwest::Client::new(),
            greek_url: greek_url.into(),
            english_url: english_url.into(),
            maps: OnceCell::new(),
        }
    }

    /// Client against the data set's published location.
    pub fn published() -> Self {
        RemoteLxx::new(DEFAULT_GREEK_URL, DEFAULT_ENGLISH_URL)
    }

    /// Look up a verse reference such as "Genesis 1:1".
    ///
    /// `Ok(None)` means the data set loaded but does not carry the verse;
    /// `Err` means the load itself failed (network, HTTP status, decode).
    pub async fn passage(&self, reference: &str) -> Result<Option<Passage>> {
        let maps = self.maps.get_or_try_init(|| self.load()).await?;
        let Some(greek) = maps.greek.get(reference) else {
            return Ok(None);
        };
        let english = maps
            .english
            .get(reference)
            .map(String::as_str)
            .unwrap_or("[English not found]");
        Ok(Some(Passage {
            original: greek.clone(),
            english: english.to_string(),
            notes: "Source: Brenton translation (public domain)".to_string(),
        }))
    }

    async fn load(&self) -> Result<LxxMaps> {
        let greek = self.fetch_map(&self.greek_url).await?;
        let english = self.fetch_map(&self.english_url).await?;
        info!(
            "loaded remote LXX data: {} Greek, {} English verses",
            greek.len(),
            english.len()
        );
        Ok(LxxMaps { greek, english })
    }

    async fn fetch_map(&self, url: &str) -> Result<HashMap<String, String>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("fetch {url}"))?
            .error_for_status()
            .with_context(|| format!("fetch {url}"))?;
        response
            .json()
            .await
            .with_context(|| format!("decode JSON from {url}"))
    }
}
