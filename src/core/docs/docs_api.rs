use async_trait::async_trait;
use thiserror::Error;

use super::docs_models::{DocRequest, Document};

/// Errors raised by the destination document API.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("Docs API request failed: {0}")]
    Http(String),
    #[error("Docs API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("Failed to authorize Docs API request: {0}")]
    Auth(String),
    #[error("Document id store error: {0}")]
    Store(String),
}

/// The three document operations the sync needs.
#[async_trait]
pub trait DocsApi: Send + Sync {
    async fn get_document(&self, document_id: &str) -> Result<Document, DocsError>;

    async fn create_document(&self, title: &str) -> Result<Document, DocsError>;

    /// Applies `requests` in order against a single starting document state.
    async fn batch_update(
        &self,
        document_id: &str,
        requests: Vec<DocRequest>,
    ) -> Result<serde_json::Value, DocsError>;
}

/// Where the id of the destination document is remembered between runs.
#[async_trait]
pub trait DocumentIdStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>, DocsError>;
    async fn save(&self, document_id: &str) -> Result<(), DocsError>;
}
