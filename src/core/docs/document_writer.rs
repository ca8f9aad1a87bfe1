use thiserror::Error;

use super::docs_api::{DocsApi, DocsError};
use super::docs_models::{index_len, DocRequest, DocTable, StructuralElement};
use crate::core::tables::{Table, TableError};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Invalid(#[from] TableError),
    #[error(transparent)]
    Docs(#[from] DocsError),
    #[error("Failed to find last table in document body")]
    TableNotFound,
    #[error("Inserted table is {found_rows}x{found_columns}, expected {rows}x{columns}")]
    ShapeMismatch {
        rows: usize,
        columns: usize,
        found_rows: usize,
        found_columns: usize,
    },
}

/// Rewrites the body of one document: clear it, then append tables.
pub struct DocumentWriter<'a, A: DocsApi> {
    api: &'a A,
    document_id: String,
}

impl<'a, A: DocsApi> DocumentWriter<'a, A> {
    pub fn new(api: &'a A, document_id: impl Into<String>) -> Self {
        Self {
            api,
            document_id: document_id.into(),
        }
    }

    /// Deletes everything between the leading section break and the final
    /// newline of the body. Returns whether a delete request was sent.
    pub async fn clear(&self) -> Result<bool, DocsError> {
        let doc = self.api.get_document(&self.document_id).await?;

        let Some(request) = clear_request(&doc.body.content) else {
            tracing::debug!(document_id = %self.document_id, "Document body already empty");
            return Ok(false);
        };

        let response = self
            .api
            .batch_update(&self.document_id, vec![request])
            .await?;
        tracing::debug!("BatchUpdateResponse: {}", response);
        Ok(true)
    }

    /// Appends `table` as a native table and fills in its cells.
    pub async fn insert_table(&self, table: &Table) -> Result<(), WriteError> {
        let (rows, columns) = table.dimensions()?;

        let response = self
            .api
            .batch_update(
                &self.document_id,
                vec![DocRequest::insert_table_at_end(rows as i64, columns as i64)],
            )
            .await?;
        tracing::debug!("BatchUpdateResponse: {}", response);

        // The insertTable reply carries no element id, so the table we just
        // appended is found again as the last table in the body.
        let doc = self.api.get_document(&self.document_id).await?;
        let inserted = doc.body.last_table().ok_or(WriteError::TableNotFound)?;
        check_shape(inserted, rows, columns)?;

        let requests = plan_cell_insertions(inserted, table);
        if requests.is_empty() {
            return Ok(());
        }

        let response = self.api.batch_update(&self.document_id, requests).await?;
        tracing::debug!("BatchUpdateResponse: {}", response);
        Ok(())
    }
}

/// Delete request covering the body interior, or `None` when there is nothing
/// removable (no segments, or an empty interior span).
pub fn clear_request(content: &[StructuralElement]) -> Option<DocRequest> {
    let first = content.first()?;
    let last = content.last()?;

    let start = first.start_index + 1;
    let end = last.end_index - 1;
    if start >= end {
        return None;
    }

    Some(DocRequest::delete_range(start, end))
}

fn check_shape(inserted: &DocTable, rows: usize, columns: usize) -> Result<(), WriteError> {
    let found_rows = inserted.table_rows.len();
    let found_columns = inserted
        .table_rows
        .first()
        .map_or(0, |r| r.table_cells.len());
    let uniform = inserted
        .table_rows
        .iter()
        .all(|r| r.table_cells.len() == found_columns);

    if found_rows != rows || found_columns != columns || !uniform {
        return Err(WriteError::ShapeMismatch {
            rows,
            columns,
            found_rows,
            found_columns,
        });
    }
    Ok(())
}

/// Builds one insertText per non-empty cell, row-major. Each insertion shifts
/// every later index by its own length, so the target of each cell is its
/// pre-insertion content start plus everything inserted before it.
///
/// `inserted` must already match `table`'s shape.
pub fn plan_cell_insertions(inserted: &DocTable, table: &Table) -> Vec<DocRequest> {
    let mut requests = Vec::new();
    let mut total_inserted = 0;

    for (doc_row, row) in inserted.table_rows.iter().zip(&table.rows) {
        for (cell, text) in doc_row.table_cells.iter().zip(&row.cells) {
            if text.is_empty() {
                continue;
            }
            requests.push(DocRequest::insert_text(
                text.as_str(),
                cell.start_index + 1 + total_inserted,
            ));
            total_inserted += index_len(text);
        }
    }

    requests
}
