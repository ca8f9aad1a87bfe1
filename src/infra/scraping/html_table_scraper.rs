use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use super::html_text::{element_text, table_rows};
use crate::core::tables::{Row, ScrapeError, Table, TableSource};

/// User-Agent sent with the page request.
const USER_AGENT: &str = concat!("table_sync/", env!("CARGO_PKG_VERSION"));

/// Scrapes every table matching a CSS selector from one page.
pub struct HtmlTableScraper {
    client: Client,
    url: String,
    table_selector: String,
}

impl HtmlTableScraper {
    pub fn new(
        url: impl Into<String>,
        table_selector: impl Into<String>,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ScrapeError::Http(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            table_selector: table_selector.into(),
        })
    }
}

#[async_trait]
impl TableSource for HtmlTableScraper {
    async fn fetch_tables(&self) -> Result<Vec<Table>, ScrapeError> {
        tracing::debug!(url = %self.url, "Fetching source page");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ScrapeError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::Http(e.to_string()))?;

        parse_tables(&body, &self.table_selector)
    }
}

/// Extracts all tables matching `table_selector` from an HTML document.
/// A page without matching tables yields an empty list.
pub fn parse_tables(html: &str, table_selector: &str) -> Result<Vec<Table>, ScrapeError> {
    let selector = Selector::parse(table_selector).map_err(|e| ScrapeError::Selector {
        selector: table_selector.to_string(),
        message: e.to_string(),
    })?;

    let document = Html::parse_document(html);
    let tables = document
        .select(&selector)
        .map(|table| {
            tracing::debug!("TableHTML: {}", table.inner_html());
            let rows = table_rows(table)
                .into_iter()
                .map(|cells| Row::new(cells.into_iter().map(element_text).collect()))
                .collect();
            Table::new(rows)
        })
        .collect();

    Ok(tables)
}
