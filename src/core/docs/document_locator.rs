use super::docs_api::{DocsApi, DocsError, DocumentIdStore};
use super::docs_models::Document;

/// Resolves the destination document: reuse the remembered one, or create a
/// fresh document and remember it for the next run.
pub struct DocumentLocator<'a, A: DocsApi, S: DocumentIdStore> {
    api: &'a A,
    store: S,
    title: String,
}

impl<'a, A: DocsApi, S: DocumentIdStore> DocumentLocator<'a, A, S> {
    pub fn new(api: &'a A, store: S, title: impl Into<String>) -> Self {
        Self {
            api,
            store,
            title: title.into(),
        }
    }

    pub async fn locate(&self) -> Result<Document, DocsError> {
        if let Some(document_id) = self.store.load().await? {
            tracing::debug!(%document_id, "Using remembered document");
            return self.api.get_document(&document_id).await;
        }

        let doc = self.api.create_document(&self.title).await?;
        tracing::info!(document_id = %doc.document_id, title = %self.title, "Created document");
        self.store.save(&doc.document_id).await?;
        Ok(doc)
    }
}
