//! CrossRef works source.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::CrossRefConfig;
use crate::models::{RateLimit, WorkMetadata};
use crate::sources::{SourceError, WorkLookup, WorksSource};
use crate::utils::{default_user_agent, HttpClient};

pub const CROSSREF_API_BASE: &str = "https://api.crossref.org";

const RATE_LIMIT_LIMIT: &str = "x-rate-limit-limit";
const RATE_LIMIT_INTERVAL: &str = "x-rate-limit-interval";

/// CrossRef research source
///
/// Uses the CrossRef REST API `works` endpoint for DOI metadata lookup.
#[derive(Debug, Clone)]
pub struct CrossRefSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl CrossRefSource {
    /// Source against another API root, e.g. a local mock server
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SourceError> {
        Self::from_config(&CrossRefConfig {
            base_url: base_url.into(),
            ..CrossRefConfig::default()
        })
    }

    pub fn from_config(config: &CrossRefConfig) -> Result<Self, SourceError> {
        let user_agent = Self::user_agent(config.mailto.as_deref());
        let client = HttpClient::with_options(&user_agent, Duration::from_secs(config.timeout_secs))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// User agent, with a contact address when one is configured (CrossRef "polite pool")
    fn user_agent(mailto: Option<&str>) -> String {
        let agent = default_user_agent();
        match mailto.map(str::trim).filter(|m| !m.is_empty()) {
            Some(mailto) => format!("{} (mailto:{})", agent, mailto),
            None => agent,
        }
    }

    fn works_url(&self, doi: &str) -> String {
        format!("{}/works/{}", self.base_url, urlencoding::encode(doi))
    }

    fn parse_rate_limit(headers: &HeaderMap) -> Option<RateLimit> {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
        RateLimit::from_header_values(header(RATE_LIMIT_LIMIT), header(RATE_LIMIT_INTERVAL))
    }

    /// Read the `message` object of a works response
    fn parse_metadata(body: &str) -> Result<Option<WorkMetadata>, SourceError> {
        let data: CRResponse = serde_json::from_str(body)?;
        Ok(data.message.map(WorkMetadata::from))
    }
}

#[async_trait]
impl WorksSource for CrossRefSource {
    fn id(&self) -> &str {
        "crossref"
    }

    fn name(&self) -> &str {
        "CrossRef"
    }

    async fn lookup_work(&self, doi: &str) -> Result<WorkLookup, SourceError> {
        let doi = doi.trim();
        if doi.is_empty() {
            return Err(SourceError::InvalidRequest("Empty DOI".to_string()));
        }

        let url = self.works_url(doi);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch DOI {}: {}", doi, e)))?;

        // Any status is accepted; error responses simply carry no metadata
        let status = response.status();
        let rate_limit = Self::parse_rate_limit(response.headers());

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response for {}: {}", doi, e)))?;

        if !status.is_success() {
            tracing::debug!("CrossRef returned status {} for {}", status, doi);
        }

        let metadata = match Self::parse_metadata(&body) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!("No usable metadata for {}: {}", doi, e);
                None
            }
        };

        Ok(WorkLookup {
            status: status.as_u16(),
            metadata,
            rate_limit,
        })
    }
}

// ===== CrossRef API Types =====

#[derive(Debug, Deserialize)]
struct CRResponse {
    message: Option<CRMessage>,
}

#[derive(Debug, Deserialize)]
struct CRMessage {
    #[serde(rename = "is-referenced-by-count")]
    is_referenced_by_count: Option<u64>,
    #[serde(rename = "reference-count")]
    reference_count: Option<u64>,
    #[serde(rename = "type")]
    work_type: Option<String>,
}

impl From<CRMessage> for WorkMetadata {
    fn from(message: CRMessage) -> Self {
        WorkMetadata {
            citation_count: message.is_referenced_by_count,
            reference_count: message.reference_count,
            work_type: message.work_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const WORK_BODY: &str = r#"{
        "status": "ok",
        "message-type": "work",
        "message": {
            "DOI": "10.1038/nature14539",
            "title": ["Human-level control through deep reinforcement learning"],
            "is-referenced-by-count": 12000,
            "reference-count": 31,
            "type": "journal-article"
        }
    }"#;

    #[test]
    fn test_user_agent() {
        let plain = CrossRefSource::user_agent(None);
        assert_eq!(plain, default_user_agent());
        assert!(!plain.contains("mailto"));

        let polite = CrossRefSource::user_agent(Some("me@example.org"));
        assert_eq!(polite, format!("{} (mailto:me@example.org)", default_user_agent()));

        assert_eq!(CrossRefSource::user_agent(Some("  ")), plain);
    }

    #[test]
    fn test_source_identity() {
        let source = CrossRefSource::from_config(&CrossRefConfig::default()).unwrap();
        assert_eq!(source.id(), "crossref");
        assert_eq!(source.name(), "CrossRef");
        assert_eq!(source.base_url, CROSSREF_API_BASE);
    }

    #[test]
    fn test_works_url() {
        let source = CrossRefSource::with_base_url("https://api.example.org/").unwrap();
        assert_eq!(
            source.works_url("10.1038/nature14539"),
            "https://api.example.org/works/10.1038%2Fnature14539"
        );
    }

    #[test]
    fn test_parse_metadata() {
        let metadata = CrossRefSource::parse_metadata(WORK_BODY).unwrap().unwrap();
        assert_eq!(metadata.citation_count, Some(12000));
        assert_eq!(metadata.reference_count, Some(31));
        assert_eq!(metadata.work_type.as_deref(), Some("journal-article"));
    }

    #[test]
    fn test_parse_metadata_rejects_non_json() {
        assert!(CrossRefSource::parse_metadata("Resource not found.").is_err());
    }

    #[test]
    fn test_parse_metadata_without_message() {
        let metadata = CrossRefSource::parse_metadata(r#"{"status": "ok"}"#).unwrap();
        assert!(metadata.is_none());
    }

    #[tokio::test]
    async fn test_lookup_work() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", Matcher::Regex(r"^/works/10\.1038".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("x-rate-limit-limit", "50")
            .with_header("x-rate-limit-interval", "1s")
            .with_body(WORK_BODY)
            .create_async()
            .await;

        let source = CrossRefSource::with_base_url(server.url()).unwrap();
        let lookup = source.lookup_work("10.1038/nature14539").await.unwrap();

        assert_eq!(lookup.status, 200);
        assert_eq!(lookup.metadata.unwrap().citation_count, Some(12000));
        assert_eq!(lookup.rate_limit, RateLimit::new(50, 1));
    }

    #[tokio::test]
    async fn test_lookup_not_found_is_not_an_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", Matcher::Regex(r"^/works/".to_string()))
            .with_status(404)
            .with_header("x-rate-limit-limit", "50")
            .with_header("x-rate-limit-interval", "1s")
            .with_body("Resource not found.")
            .create_async()
            .await;

        let source = CrossRefSource::with_base_url(server.url()).unwrap();
        let lookup = source.lookup_work("10.9999/missing").await.unwrap();

        assert_eq!(lookup.status, 404);
        assert!(lookup.metadata.is_none());
        assert!(lookup.rate_limit.is_some());
    }

    #[tokio::test]
    async fn test_lookup_connection_refused() {
        // Nothing listens on port 1
        let source = CrossRefSource::with_base_url("http://127.0.0.1:1").unwrap();
        let result = source.lookup_work("10.1038/nature14539").await;

        assert!(matches!(result, Err(SourceError::Network(_))));
    }

    #[tokio::test]
    async fn test_lookup_empty_doi() {
        let source = CrossRefSource::with_base_url("http://127.0.0.1:1").unwrap();
        let result = source.lookup_work("  ").await;

        assert!(matches!(result, Err(SourceError::InvalidRequest(_))));
    }
}
