use async_trait::async_trait;
use thiserror::Error;

use super::table_models::Table;

/// Errors raised while fetching or parsing the source page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Failed to fetch source page: {0}")]
    Http(String),
    #[error("Non-okay status code: {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("Invalid CSS selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Anything that can produce the ordered list of tables to publish.
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch_tables(&self) -> Result<Vec<Table>, ScrapeError>;
}
