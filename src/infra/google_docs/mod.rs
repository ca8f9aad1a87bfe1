// =============================================================================
// GOOGLE DOCS MODULE
// =============================================================================
//
// Implements the core `DocsApi` seam over the Google Docs REST API. The core
// layer only sees documents and batch requests; URLs, Bearer headers and
// HTTP status handling stay here.

pub mod google_docs_client;

pub use google_docs_client::GoogleDocsClient;
