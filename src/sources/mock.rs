//! Mock source for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::WorkMetadata;
use crate::sources::{SourceError, WorkLookup, WorksSource};

#[derive(Debug, Clone)]
enum MockReply {
    Lookup(WorkLookup),
    NetworkError(String),
}

/// A mock source for testing that returns predefined lookups.
///
/// DOIs without a configured reply answer like a registry that does not
/// know the work: status 404, no metadata, no rate limit.
#[derive(Debug, Default)]
pub struct MockSource {
    replies: Mutex<HashMap<String, MockReply>>,
    requests: Mutex<Vec<String>>,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer lookups of `doi` with `lookup`.
    pub fn set_lookup(&self, doi: &str, lookup: WorkLookup) {
        let mut guard = self.replies.lock().unwrap();
        guard.insert(doi.to_string(), MockReply::Lookup(lookup));
    }

    /// Answer lookups of `doi` with a 200 carrying `metadata`.
    pub fn set_metadata(&self, doi: &str, metadata: WorkMetadata) {
        self.set_lookup(doi, WorkLookup::new(200).metadata(metadata));
    }

    /// Fail lookups of `doi` as if the connection broke.
    pub fn set_network_error(&self, doi: &str, message: &str) {
        let mut guard = self.replies.lock().unwrap();
        guard.insert(
            doi.to_string(),
            MockReply::NetworkError(message.to_string()),
        );
    }

    /// DOIs looked up so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorksSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn lookup_work(&self, doi: &str) -> Result<WorkLookup, SourceError> {
        self.requests.lock().unwrap().push(doi.to_string());

        let guard = self.replies.lock().unwrap();
        match guard.get(doi) {
            Some(MockReply::Lookup(lookup)) => Ok(lookup.clone()),
            Some(MockReply::NetworkError(message)) => Err(SourceError::Network(message.clone())),
            None => Ok(WorkLookup::new(404)),
        }
    }
}
