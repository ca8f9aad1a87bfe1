// Destination document: the API seam, the document model, and the two
// services built on top of it.

pub mod docs_api;
pub mod docs_models;
pub mod document_locator;
pub mod document_writer;

#[cfg(test)]
pub mod fake_docs;

pub use docs_api::{DocsApi, DocsError, DocumentIdStore};
pub use docs_models::{DocRequest, Document};
pub use document_locator::DocumentLocator;
pub use document_writer::DocumentWriter;
