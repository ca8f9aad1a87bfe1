// =============================================================================
// GOOGLE DOCS CLIENT
// =============================================================================
//
// REST client for the Google Docs v1 API. Every request carries a Bearer
// token taken from an `AccessTokenSource`, so the same client works with
// both the interactive OAuth session and a service account.
//
// Endpoints used:
// - `GET  /v1/documents/{id}`              read the document structure
// - `POST /v1/documents`                   create an empty document
// - `POST /v1/documents/{id}:batchUpdate`  apply a list of edit requests

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;

use crate::core::auth::AccessTokenSource;
use crate::core::docs::{DocRequest, DocsApi, DocsError, Document};

const DOCS_API_BASE: &str = "https://docs.googleapis.com/v1/documents";

#[derive(Debug, Serialize)]
struct CreateDocumentBody<'a> {
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct BatchUpdateBody {
    requests: Vec<DocRequest>,
}

pub struct GoogleDocsClient<T: AccessTokenSource> {
    client: Client,
    auth: T,
    base_url: String,
}

impl<T: AccessTokenSource> GoogleDocsClient<T> {
    pub fn new(auth: T) -> Self {
        Self::with_base_url(auth, DOCS_API_BASE)
    }

    /// Points the client at another API root.
    pub fn with_base_url(auth: T, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            auth,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn document_url(&self, document_id: &str) -> String {
        format!("{}/{}", self.base_url, document_id)
    }

    fn batch_update_url(&self, document_id: &str) -> String {
        format!("{}/{}:batchUpdate", self.base_url, document_id)
    }

    /// Attaches the Bearer token and sends the request.
    async fn send(&self, request: RequestBuilder) -> Result<Response, DocsError> {
        let token = self
            .auth
            .access_token()
            .await
            .map_err(|e| DocsError::Auth(e.to_string()))?;

        let response = request
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| DocsError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DocsError::Api { status, body });
        }

        Ok(response)
    }
}

#[async_trait]
impl<T: AccessTokenSource> DocsApi for GoogleDocsClient<T> {
    async fn get_document(&self, document_id: &str) -> Result<Document, DocsError> {
        tracing::debug!("Fetching Google Doc via API: {}", document_id);

        let response = self
            .send(self.client.get(self.document_url(document_id)))
            .await?;
        response
            .json()
            .await
            .map_err(|e| DocsError::Http(e.to_string()))
    }

    async fn create_document(&self, title: &str) -> Result<Document, DocsError> {
        let response = self
            .send(
                self.client
                    .post(&self.base_url)
                    .json(&CreateDocumentBody { title }),
            )
            .await?;
        response
            .json()
            .await
            .map_err(|e| DocsError::Http(e.to_string()))
    }

    async fn batch_update(
        &self,
        document_id: &str,
        requests: Vec<DocRequest>,
    ) -> Result<serde_json::Value, DocsError> {
        tracing::debug!(
            "Sending {} request(s) to document {}",
            requests.len(),
            document_id
        );

        let response = self
            .send(
                self.client
                    .post(self.batch_update_url(document_id))
                    .json(&BatchUpdateBody { requests }),
            )
            .await?;
        response
            .json()
            .await
            .map_err(|e| DocsError::Http(e.to_string()))
    }
}
