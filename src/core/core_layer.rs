// The core module contains the sync logic and the traits infra implements.
// Nothing in here knows about HTTP, HTML parsing, or files on disk.

#[path = "tables/mod.rs"]
pub mod tables;

#[path = "auth/mod.rs"]
pub mod auth;

#[path = "docs/mod.rs"]
pub mod docs;

#[path = "sync/mod.rs"]
pub mod sync;
