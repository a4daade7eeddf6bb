use async_trait::async_trait;

use crate::source::{PlaceSource, SourceError};

/// Fetches dataset files relative to a base URL, one GET per load.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn url_for(&self, file: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            file.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl PlaceSource for HttpSource {
    async fn fetch(&self, file: &str) -> Result<String, SourceError> {
        let url = self.url_for(file);
        tracing::debug!(%url, "fetching dataset");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(url));
        }
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                file: file.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let source = HttpSource::new("https://example.org/data/");
        assert_eq!(
            source.url_for("/parki_narodowe.geojson"),
            "https://example.org/data/parki_narodowe.geojson"
        );
        let source = HttpSource::new("https://example.org/data");
        assert_eq!(
            source.url_for("wolin.geojson"),
            "https://example.org/data/wolin.geojson"
        );
    }
}
