//! Document Sources
//!
//! Where a dashboard document comes from: a local file or an HTTP URL.

use super::error::{DocumentError, DocumentResult};
use super::types::StationDocument;
use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Common trait for anything that can produce a dashboard document
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Human-readable location (path or URL)
    fn location(&self) -> &str;

    /// Fetch and parse the document
    async fn fetch(&self) -> DocumentResult<StationDocument>;
}

/// Document stored on the local filesystem
pub struct FileSource {
    path: PathBuf,
    display: String,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let display = path.display().to_string();
        Self { path, display }
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    fn location(&self) -> &str {
        &self.display
    }

    async fn fetch(&self) -> DocumentResult<StationDocument> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DocumentError::Io {
                path: self.path.clone(),
                error: e.to_string(),
            })?;

        tracing::debug!(path = %self.display, bytes = text.len(), "Read document");
        StationDocument::from_json(&text)
    }
}

/// Document served over HTTP
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a source with a request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> DocumentResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> DocumentResult<StationDocument> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                DocumentError::Timeout
            } else if e.is_connect() {
                DocumentError::Unavailable(self.url.clone())
            } else {
                DocumentError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocumentError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        tracing::debug!(url = %self.url, bytes = text.len(), "Fetched document");
        StationDocument::from_json(&text)
    }
}

/// Pick a source for a location: URLs go over HTTP, anything else is a path
pub fn source_for(location: &str, timeout: Duration) -> DocumentResult<Box<dyn DocumentSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}
