//! Retrieval of the pipeline inputs.
//!
//! Documents are fetched one after another: the upstream catalog, the
//! language names table, the legacy catalog when configured, then each
//! supplemental source in configured order followed by the supplemental
//! directory. Any failure aborts the whole fetch; there is no partial result.
//!
//! Every location is either an `http(s)://` URL, fetched with `ureq`, or a
//! path on disk.
//!
//! The result is a [`Sources`] bundle that can be written to the temp
//! directory, so `fetch` and `build` run as separate steps:
//!
//! ```text
//! <temp-dir>/
//! └── sources.json   # { catalog, languageMetadata, supplements }
//! ```

use crate::config::SourcesConfig;
use crate::legacy;
use crate::raw::{LanguageMetadata, RawCatalog};
use crate::supplement::{self, Supplement, SupplementError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// File name of the saved bundle inside the temp directory.
pub const SOURCES_FILE: &str = "sources.json";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error {status} fetching {url}")]
    Status { url: String, status: u16 },
    #[error("Transport error fetching {url}: {message}")]
    Transport { url: String, message: String },
    #[error("Invalid JSON from {location}: {source}")]
    Json {
        location: String,
        source: serde_json::Error,
    },
    #[error("Supplement error: {0}")]
    Supplement(#[from] SupplementError),
}

/// Everything the pipeline needs, as fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sources {
    /// The upstream catalog exactly as received.
    pub catalog: serde_json::Value,
    pub language_metadata: Vec<LanguageMetadata>,
    pub supplements: Vec<Supplement>,
}

impl Sources {
    /// The upstream catalog decoded into its raw schema.
    pub fn raw_catalog(&self) -> Result<RawCatalog, serde_json::Error> {
        RawCatalog::deserialize(&self.catalog)
    }

    pub fn save(&self, path: &Path) -> Result<(), FetchError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(self).map_err(|source| FetchError::Json {
            location: path.display().to_string(),
            source,
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, FetchError> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|source| FetchError::Json {
            location: path.display().to_string(),
            source,
        })
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Reads locations over HTTP or from disk.
pub struct Fetcher {
    agent: ureq::Agent,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent }
    }

    /// Body of a URL or contents of a file.
    pub fn read(&self, location: &str) -> Result<String, FetchError> {
        if !is_url(location) {
            return Ok(fs::read_to_string(location)?);
        }

        match self.agent.get(location).call() {
            Ok(response) => {
                // `into_string` caps bodies at 10 MB; the catalog is larger.
                let mut body = String::new();
                response.into_reader().read_to_string(&mut body)?;
                Ok(body)
            }
            Err(ureq::Error::Status(status, _)) => Err(FetchError::Status {
                url: location.to_string(),
                status,
            }),
            Err(ureq::Error::Transport(transport)) => Err(FetchError::Transport {
                url: location.to_string(),
                message: transport.to_string(),
            }),
        }
    }

    pub fn read_json<T: DeserializeOwned>(&self, location: &str) -> Result<T, FetchError> {
        let body = self.read(location)?;
        serde_json::from_str(&body).map_err(|source| FetchError::Json {
            location: location.to_string(),
            source,
        })
    }
}

/// Fetch every configured input, in order.
pub fn fetch_sources(config: &SourcesConfig) -> Result<Sources, FetchError> {
    let fetcher = Fetcher::new(Duration::from_secs(config.timeout_secs));

    info!(url = %config.catalog_url, "fetching catalog");
    let catalog: serde_json::Value = fetcher.read_json(&config.catalog_url)?;
    // Reject a catalog the pipeline can't read now rather than at build time.
    RawCatalog::deserialize(&catalog).map_err(|source| FetchError::Json {
        location: config.catalog_url.clone(),
        source,
    })?;

    info!(url = %config.language_names_url, "fetching language names");
    let language_metadata: Vec<LanguageMetadata> =
        fetcher.read_json(&config.language_names_url)?;
    info!(entries = language_metadata.len(), "language names fetched");

    let mut supplements = Vec::new();

    if let Some(url) = &config.legacy_catalog_url {
        info!(%url, "fetching legacy catalog");
        let body = fetcher.read(url)?;
        supplements.push(legacy::supplement_from_json(url, &body)?);
    }

    for location in &config.supplemental {
        info!(%location, "fetching supplemental source");
        let body = fetcher.read(location)?;
        supplements.push(Supplement::from_json(location.as_str(), &body)?);
    }

    if let Some(dir) = &config.supplemental_dir {
        if dir.is_dir() {
            let loaded = supplement::load_dir(dir)?;
            info!(dir = %dir.display(), files = loaded.len(), "loaded supplemental directory");
            supplements.extend(loaded);
        } else {
            warn!(dir = %dir.display(), "supplemental directory does not exist, skipping");
        }
    }

    Ok(Sources {
        catalog,
        language_metadata,
        supplements,
    })
}
