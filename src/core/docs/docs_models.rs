// Document model and mutation requests, shaped after the Google Docs v1 REST
// resources. Only the fields the writer needs are kept; everything else in the
// API response is ignored during deserialization.
//
// Indices are UTF-16 code unit offsets into the document body, as returned by
// the API. The leading section break has no `startIndex` on the wire, so every
// `start_index` defaults to 0.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub document_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Body,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

impl Body {
    /// The last table element in body order, if any.
    pub fn last_table(&self) -> Option<&DocTable> {
        self.content.iter().rev().find_map(|el| el.table.as_ref())
    }
}

/// A content segment of the body: paragraph, table, section break, ...
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralElement {
    #[serde(default)]
    pub start_index: i64,
    #[serde(default)]
    pub end_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<Paragraph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<DocTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_break: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
}

#[cfg(test)]
impl Paragraph {
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|el| el.text_run.as_ref())
            .map(|run| run.content.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElement {
    #[serde(default)]
    pub start_index: i64,
    #[serde(default)]
    pub end_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocTable {
    #[serde(default)]
    pub rows: i64,
    #[serde(default)]
    pub columns: i64,
    #[serde(default)]
    pub table_rows: Vec<DocTableRow>,
}

#[cfg(test)]
impl DocTable {
    /// Cell texts with the trailing paragraph newline stripped, row by row.
    pub fn cell_texts(&self) -> Vec<Vec<String>> {
        self.table_rows
            .iter()
            .map(|row| row.table_cells.iter().map(DocTableCell::text).collect())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocTableRow {
    #[serde(default)]
    pub start_index: i64,
    #[serde(default)]
    pub end_index: i64,
    #[serde(default)]
    pub table_cells: Vec<DocTableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocTableCell {
    #[serde(default)]
    pub start_index: i64,
    #[serde(default)]
    pub end_index: i64,
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

#[cfg(test)]
impl DocTableCell {
    pub fn text(&self) -> String {
        let mut text: String = self
            .content
            .iter()
            .filter_map(|el| el.paragraph.as_ref())
            .map(Paragraph::text)
            .collect();
        if text.ends_with('\n') {
            text.pop();
        }
        text
    }
}

// =============================================================================
// BATCH UPDATE REQUESTS
// =============================================================================

/// One mutation inside a `documents.batchUpdate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocRequest {
    DeleteContentRange(DeleteContentRangeRequest),
    InsertTable(InsertTableRequest),
    InsertText(InsertTextRequest),
}

impl DocRequest {
    pub fn delete_range(start_index: i64, end_index: i64) -> Self {
        Self::DeleteContentRange(DeleteContentRangeRequest {
            range: Range {
                start_index,
                end_index,
            },
        })
    }

    pub fn insert_table_at_end(rows: i64, columns: i64) -> Self {
        Self::InsertTable(InsertTableRequest {
            rows,
            columns,
            end_of_segment_location: EndOfSegmentLocation::default(),
        })
    }

    pub fn insert_text(text: impl Into<String>, index: i64) -> Self {
        Self::InsertText(InsertTextRequest {
            text: text.into(),
            location: Location { index },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteContentRangeRequest {
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: i64,
    pub end_index: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTableRequest {
    pub rows: i64,
    pub columns: i64,
    pub end_of_segment_location: EndOfSegmentLocation,
}

/// Empty location means "end of the document body".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndOfSegmentLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextRequest {
    pub text: String,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub index: i64,
}

/// Length of `text` in the unit the document API indexes by.
pub fn index_len(text: &str) -> i64 {
    text.encode_utf16().count() as i64
}
