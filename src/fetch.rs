//! Fetching image bytes from URLs, files, or memory.

use std::{collections::HashMap, path::Path, sync::Arc, time::Duration};

use crate::{config::FetchConfig, error::FetchError};

/// Source of raw image bytes.
///
/// Sources are URLs or file paths. Implementations must be shareable across
/// the threads of a batch.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, source: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches `http(s)` URLs with a blocking client and reads everything else
/// from the file system.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, source: &str) -> Result<Vec<u8>, FetchError> {
        if !is_remote(source) {
            let path = source.strip_prefix("file://").unwrap_or(source);
            return Ok(std::fs::read(Path::new(path))?);
        }

        let response = self.client.get(source).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: source.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// In-memory fetcher. Unknown sources fail with [`FetchError::NotFound`].
#[derive(Clone, Default)]
pub struct StaticFetcher {
    entries: HashMap<String, Arc<[u8]>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries
            .insert(source.into(), Arc::from(bytes.into().into_boxed_slice()));
    }

    pub fn with(mut self, source: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(source, bytes);
        self
    }
}

impl ImageFetcher for StaticFetcher {
    fn fetch(&self, source: &str) -> Result<Vec<u8>, FetchError> {
        self.entries
            .get(source)
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| FetchError::NotFound(source.to_string()))
    }
}
