// This is the entry point of the table sync.
//
// **Architecture Overview:**
// - `core/` = Sync logic and the traits it depends on (no I/O)
// - `infra/` = Implementations of core traits (HTTP, HTML, files)
// - `config.rs` = Settings read from the environment
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Run Fetch → Authenticate → Publish and report the outcome

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use std::path::Path;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::{ServiceAccountKey, SyncConfig, DOCUMENTS_SCOPE};
use crate::core::auth::{AccessTokenSource, AuthError};
use crate::core::sync::{SyncReport, SyncService};
use crate::core::tables::TableSource;
use crate::infra::auth::{ConsoleCodePrompt, GoogleAuth};
use crate::infra::document_id::FileDocumentIdStore;
use crate::infra::google_docs::GoogleDocsClient;
use crate::infra::scraping::HtmlTableScraper;

/// Picks the service account when one is configured, otherwise runs the
/// cached-token / consent-screen flow.
async fn authenticate(config: &SyncConfig) -> Result<GoogleAuth, AuthError> {
    let auth = match &config.service_account {
        Some(ServiceAccountKey::File(path)) => {
            GoogleAuth::service_account_file(path, DOCUMENTS_SCOPE).await?
        }
        Some(ServiceAccountKey::Inline(json)) => {
            GoogleAuth::service_account_json(json, DOCUMENTS_SCOPE).await?
        }
        None => {
            GoogleAuth::installed_flow(
                &config.credentials_path,
                &config.token_path,
                DOCUMENTS_SCOPE,
                ConsoleCodePrompt,
            )
            .await?
        }
    };

    // Authorize up front so a rejected consent fails here, not mid-sync.
    auth.access_token().await?;
    Ok(auth)
}

async fn run(config: &SyncConfig) -> anyhow::Result<SyncReport> {
    // ========================================================================
    // FETCH
    // ========================================================================
    let scraper = HtmlTableScraper::new(&config.source_url, &config.table_selector)
        .context("Failed to get tables")?;
    let tables = scraper
        .fetch_tables()
        .await
        .context("Failed to get tables")?;
    tracing::info!("TablesCount: {}", tables.len());

    // ========================================================================
    // AUTHENTICATE
    // ========================================================================
    let auth = authenticate(config)
        .await
        .context("Failed to get service")?;
    let docs = GoogleDocsClient::new(auth);

    // ========================================================================
    // PUBLISH
    // ========================================================================
    let service = SyncService::new(
        &docs,
        FileDocumentIdStore::new(&config.document_id_path),
        config.document_title.as_str(),
    );
    let report = service.publish(&tables).await?;
    Ok(report)
}

fn log_report(report: &SyncReport) {
    tracing::info!(
        "Inserted {}/{} table(s) into document {}",
        report.tables_inserted,
        report.tables_total,
        report.document_id
    );
    if !report.cleared {
        tracing::warn!("Document was not cleared; old content may remain");
    }
    for failure in &report.failures {
        tracing::warn!("Table #{} skipped: {}", failure.index + 1, failure.message);
    }
    if report.is_complete() {
        tracing::info!("Sync finished");
    }
}

/// Loads environment variables from a .env file (the working directory's if
/// `env_file` is `None`), then builds the log filter, so `RUST_LOG` may come
/// from the file too.
fn load_env(env_file: Option<&Path>) -> EnvFilter {
    if let Some(path) = env_file {
        dotenv::from_path(path).ok();
    } else {
        dotenv::dotenv().ok();
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt()
        .with_env_filter(load_env(None))
        .init();

    let config = SyncConfig::from_env();
    tracing::debug!(
        "Source: {} ({})",
        config.source_url,
        config.table_selector
    );

    match run(&config).await {
        Ok(report) => log_report(&report),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
