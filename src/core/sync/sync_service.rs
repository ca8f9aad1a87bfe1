use thiserror::Error;

use crate::core::docs::{DocsApi, DocsError, DocumentIdStore, DocumentLocator, DocumentWriter};
use crate::core::tables::Table;

/// Failures that stop a sync before anything is written.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to get document: {0}")]
    Locate(#[from] DocsError),
}

/// A table that could not be written, with its position in the scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFailure {
    pub index: usize,
    pub message: String,
}

/// Outcome of one publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub document_id: String,
    pub cleared: bool,
    pub tables_total: usize,
    pub tables_inserted: usize,
    pub failures: Vec<TableFailure>,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.cleared && self.failures.is_empty()
    }
}

/// Publishes scraped tables into the destination document: locate it, wipe
/// it, then append every table. Only locating the document is fatal; a failed
/// clear or table insert is logged and the run moves on.
pub struct SyncService<'a, A: DocsApi, S: DocumentIdStore> {
    api: &'a A,
    locator: DocumentLocator<'a, A, S>,
}

impl<'a, A: DocsApi, S: DocumentIdStore> SyncService<'a, A, S> {
    pub fn new(api: &'a A, id_store: S, title: impl Into<String>) -> Self {
        Self {
            api,
            locator: DocumentLocator::new(api, id_store, title),
        }
    }

    pub async fn publish(&self, tables: &[Table]) -> Result<SyncReport, SyncError> {
        let doc = self.locator.locate().await?;
        tracing::info!("DocumentId: {}", doc.document_id);

        let writer = DocumentWriter::new(self.api, doc.document_id.as_str());

        let cleared = match writer.clear().await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Failed to clear document {}: {}", doc.document_id, e);
                false
            }
        };

        let mut tables_inserted = 0;
        let mut failures = Vec::new();
        for (index, table) in tables.iter().enumerate() {
            match writer.insert_table(table).await {
                Ok(()) => {
                    tables_inserted += 1;
                    tracing::debug!(table = index, rows = table.rows.len(), "Inserted table");
                }
                Err(e) => {
                    tracing::error!("Failed to insert table #{}: {}", index + 1, e);
                    failures.push(TableFailure {
                        index,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(SyncReport {
            document_id: doc.document_id,
            cleared,
            tables_total: tables.len(),
            tables_inserted,
            failures,
        })
    }
}
