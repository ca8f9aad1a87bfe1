// The infra module contains implementations of core traits.
// Each external system gets its own submodule.

#[path = "scraping/mod.rs"]
pub mod scraping;

#[path = "auth/mod.rs"]
pub mod auth;

#[path = "google_docs/mod.rs"]
pub mod google_docs;

#[path = "document_id/mod.rs"]
pub mod document_id;
