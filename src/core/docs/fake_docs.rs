// In-memory stand-in for the Docs API used by the core tests.
//
// It keeps a tiny body model (section break, paragraphs, tables) and
// recomputes structural indices after every request, the same way the real
// API does. Each table takes one index for itself, one per row, and one per
// cell, and every cell holds a paragraph ending in "\n".

use std::sync::Mutex;

use async_trait::async_trait;

use super::docs_api::{DocsApi, DocsError, DocumentIdStore};
use super::docs_models::{
    index_len, Body, DocRequest, DocTable, DocTableCell, DocTableRow, Document, Paragraph,
    ParagraphElement, StructuralElement, TextRun,
};

#[derive(Debug, Clone)]
enum Block {
    Paragraph(String),
    Table(Vec<Vec<String>>),
}

#[derive(Debug, Default)]
struct FakeState {
    documents: Vec<(String, String, Vec<Block>)>,
    batches: Vec<Vec<DocRequest>>,
    gets: usize,
    next_id: usize,
    fail_inserts_after: Option<usize>,
    fail_deletes: bool,
}

#[derive(Debug, Default)]
pub struct FakeDocsApi {
    state: Mutex<FakeState>,
}

impl FakeDocsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document with the given paragraphs (each should end in "\n").
    pub fn with_document(self, id: &str, paragraphs: &[&str]) -> Self {
        let blocks = paragraphs
            .iter()
            .map(|p| Block::Paragraph(p.to_string()))
            .collect();
        self.state
            .lock()
            .unwrap()
            .documents
            .push((id.to_string(), "seeded".to_string(), blocks));
        self
    }

    /// Makes every `insertTable` after the first `n` fail.
    pub fn fail_table_inserts_after(self, n: usize) -> Self {
        self.state.lock().unwrap().fail_inserts_after = Some(n);
        self
    }

    pub fn fail_deletes(self) -> Self {
        self.state.lock().unwrap().fail_deletes = true;
        self
    }

    pub fn batches(&self) -> Vec<Vec<DocRequest>> {
        self.state.lock().unwrap().batches.clone()
    }

    pub fn document_count(&self) -> usize {
        self.state.lock().unwrap().documents.len()
    }

    pub fn get_count(&self) -> usize {
        self.state.lock().unwrap().gets
    }

    fn blocks(&self, id: &str) -> Vec<Block> {
        let state = self.state.lock().unwrap();
        state
            .documents
            .iter()
            .find(|(doc_id, _, _)| doc_id == id)
            .map(|(_, _, blocks)| blocks.clone())
            .expect("unknown fake document")
    }

    /// Cell texts of every table in the document, in body order.
    pub fn tables(&self, id: &str) -> Vec<Vec<Vec<String>>> {
        self.blocks(id)
            .into_iter()
            .filter_map(|b| match b {
                Block::Table(cells) => Some(cells),
                Block::Paragraph(_) => None,
            })
            .collect()
    }

    /// Concatenated text of top-level paragraphs.
    pub fn paragraph_text(&self, id: &str) -> String {
        self.blocks(id)
            .into_iter()
            .filter_map(|b| match b {
                Block::Paragraph(text) => Some(text),
                Block::Table(_) => None,
            })
            .collect()
    }
}

fn paragraph_element(start: i64, text: &str) -> StructuralElement {
    let end = start + index_len(text);
    StructuralElement {
        start_index: start,
        end_index: end,
        paragraph: Some(Paragraph {
            elements: vec![ParagraphElement {
                start_index: start,
                end_index: end,
                text_run: Some(TextRun {
                    content: text.to_string(),
                }),
            }],
        }),
        ..Default::default()
    }
}

fn render(id: &str, title: &str, blocks: &[Block]) -> Document {
    let mut content = vec![StructuralElement {
        start_index: 0,
        end_index: 1,
        section_break: Some(serde_json::json!({})),
        ..Default::default()
    }];
    let mut index = 1;

    for block in blocks {
        match block {
            Block::Paragraph(text) => {
                let el = paragraph_element(index, text);
                index = el.end_index;
                content.push(el);
            }
            Block::Table(rows) => {
                let table_start = index;
                index += 1;
                let mut table_rows = Vec::new();
                for row in rows {
                    let row_start = index;
                    index += 1;
                    let mut table_cells = Vec::new();
                    for cell in row {
                        let cell_start = index;
                        index += 1;
                        let paragraph = paragraph_element(index, &format!("{cell}\n"));
                        index = paragraph.end_index;
                        table_cells.push(DocTableCell {
                            start_index: cell_start,
                            end_index: index,
                            content: vec![paragraph],
                        });
                    }
                    table_rows.push(DocTableRow {
                        start_index: row_start,
                        end_index: index,
                        table_cells,
                    });
                }
                content.push(StructuralElement {
                    start_index: table_start,
                    end_index: index,
                    table: Some(DocTable {
                        rows: rows.len() as i64,
                        columns: rows.first().map_or(0, |r| r.len() as i64),
                        table_rows,
                    }),
                    ..Default::default()
                });
            }
        }
    }

    Document {
        document_id: id.to_string(),
        title: title.to_string(),
        body: Body { content },
    }
}

fn byte_offset(text: &str, utf16_offset: i64) -> Option<usize> {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units == utf16_offset {
            return Some(byte);
        }
        units += ch.len_utf16() as i64;
    }
    (units == utf16_offset).then_some(text.len())
}

/// Inserts `text` at a body index that must fall inside a cell paragraph,
/// before its trailing newline.
fn insert_text(blocks: &mut [Block], at: i64, text: &str) -> Result<(), String> {
    let mut index = 1;
    for block in blocks.iter_mut() {
        match block {
            Block::Paragraph(para) => index += index_len(para),
            Block::Table(rows) => {
                index += 1;
                for row in rows.iter_mut() {
                    index += 1;
                    for cell in row.iter_mut() {
                        index += 1;
                        let content_start = index;
                        let content_end = content_start + index_len(cell);
                        if (content_start..=content_end).contains(&at) {
                            let offset = byte_offset(cell, at - content_start)
                                .ok_or_else(|| format!("index {at} splits a character"))?;
                            cell.insert_str(offset, text);
                            return Ok(());
                        }
                        index = content_end + 1;
                    }
                }
            }
        }
    }
    Err(format!("index {at} is not inside a table cell"))
}

impl FakeState {
    fn apply(&mut self, id: &str, request: &DocRequest) -> Result<(), String> {
        let fail_deletes = self.fail_deletes;
        let inserted_tables = self
            .batches
            .iter()
            .flatten()
            .filter(|r| matches!(r, DocRequest::InsertTable(_)))
            .count();
        let fail_inserts_after = self.fail_inserts_after;

        let (_, title, blocks) = self
            .documents
            .iter_mut()
            .find(|(doc_id, _, _)| doc_id == id)
            .ok_or_else(|| format!("document {id} not found"))?;

        match request {
            DocRequest::DeleteContentRange(req) => {
                if fail_deletes {
                    return Err("delete refused".to_string());
                }
                let end = render(id, title, blocks)
                    .body
                    .content
                    .last()
                    .map_or(1, |el| el.end_index);
                if req.range.start_index != 1 || req.range.end_index != end - 1 {
                    return Err(format!(
                        "fake only supports deleting the whole body, got {:?}",
                        req.range
                    ));
                }
                if req.range.start_index >= req.range.end_index {
                    return Err("empty range".to_string());
                }
                *blocks = vec![Block::Paragraph("\n".to_string())];
                Ok(())
            }
            DocRequest::InsertTable(req) => {
                if fail_inserts_after.is_some_and(|n| inserted_tables >= n) {
                    return Err("insertTable refused".to_string());
                }
                if req.rows < 1 || req.columns < 1 {
                    return Err("table must have at least one row and column".to_string());
                }
                let table =
                    vec![vec![String::new(); req.columns as usize]; req.rows as usize];
                // Real docs always keep a trailing paragraph after a table.
                blocks.push(Block::Table(table));
                blocks.push(Block::Paragraph("\n".to_string()));
                Ok(())
            }
            DocRequest::InsertText(req) => {
                insert_text(blocks, req.location.index, &req.text)
            }
        }
    }
}

#[async_trait]
impl DocsApi for FakeDocsApi {
    async fn get_document(&self, document_id: &str) -> Result<Document, DocsError> {
        let mut state = self.state.lock().unwrap();
        state.gets += 1;
        state
            .documents
            .iter()
            .find(|(id, _, _)| id == document_id)
            .map(|(id, title, blocks)| render(id, title, blocks))
            .ok_or_else(|| DocsError::Api {
                status: 404,
                body: format!("Requested entity was not found: {document_id}"),
            })
    }

    async fn create_document(&self, title: &str) -> Result<Document, DocsError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("fake-doc-{}", state.next_id);
        let blocks = vec![Block::Paragraph("\n".to_string())];
        let doc = render(&id, title, &blocks);
        state.documents.push((id, title.to_string(), blocks));
        Ok(doc)
    }

    async fn batch_update(
        &self,
        document_id: &str,
        requests: Vec<DocRequest>,
    ) -> Result<serde_json::Value, DocsError> {
        let mut state = self.state.lock().unwrap();

        // All-or-nothing, like the real batch endpoint.
        let snapshot = state
            .documents
            .iter()
            .find(|(id, _, _)| id == document_id)
            .map(|(_, _, blocks)| blocks.clone());

        for request in &requests {
            if let Err(message) = state.apply(document_id, request) {
                if let Some(blocks) = snapshot {
                    if let Some(doc) = state.documents.iter_mut().find(|(id, _, _)| id == document_id) {
                        doc.2 = blocks;
                    }
                }
                return Err(DocsError::Api {
                    status: 400,
                    body: message,
                });
            }
        }

        state.batches.push(requests);
        Ok(serde_json::json!({ "documentId": document_id }))
    }
}

/// Document id store that lives in memory only.
#[derive(Debug, Default)]
pub struct MemoryIdStore {
    id: Mutex<Option<String>>,
    fail_saves: bool,
}

impl MemoryIdStore {
    pub fn with_id(id: &str) -> Self {
        Self {
            id: Mutex::new(Some(id.to_string())),
            fail_saves: false,
        }
    }

    /// Store whose `save` always fails.
    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Default::default()
        }
    }

    pub fn current(&self) -> Option<String> {
        self.id.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentIdStore for MemoryIdStore {
    async fn load(&self) -> Result<Option<String>, DocsError> {
        Ok(self.id.lock().unwrap().clone())
    }

    async fn save(&self, document_id: &str) -> Result<(), DocsError> {
        if self.fail_saves {
            return Err(DocsError::Store("read-only store".to_string()));
        }
        *self.id.lock().unwrap() = Some(document_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_document_has_section_break_and_empty_paragraph() {
        let api = FakeDocsApi::new();
        let doc = api.create_document("t").await.unwrap();
        let content = &doc.body.content;
        assert_eq!(content.len(), 2);
        assert_eq!((content[0].start_index, content[0].end_index), (0, 1));
        assert_eq!((content[1].start_index, content[1].end_index), (1, 2));
    }

    #[tokio::test]
    async fn table_indices_follow_the_api_layout() {
        let api = FakeDocsApi::new();
        let doc = api.create_document("t").await.unwrap();
        api.batch_update(&doc.document_id, vec![DocRequest::insert_table_at_end(2, 2)])
            .await
            .unwrap();

        let doc = api.get_document(&doc.document_id).await.unwrap();
        let table = doc.body.last_table().unwrap();
        let starts: Vec<i64> = table
            .table_rows
            .iter()
            .flat_map(|r| r.table_cells.iter().map(|c| c.start_index))
            .collect();
        // table@2, row@3, cells@4,6, row@8, cells@9,11
        assert_eq!(starts, vec![4, 6, 9, 11]);
    }
}
