// Runtime settings, read once from the environment (after `.env` is loaded).

const DEFAULT_SOURCE_URL: &str =
    "https://confluence.hflabs.ru/pages/viewpage.action?pageId=1181220999";
const DEFAULT_TABLE_SELECTOR: &str = ".confluenceTable";
const DEFAULT_CREDENTIALS_PATH: &str = "credentials.json";
const DEFAULT_TOKEN_PATH: &str = "token.json";
const DEFAULT_DOCUMENT_ID_PATH: &str = "document_id.txt";
const DEFAULT_DOCUMENT_TITLE: &str = "HFLabsTestTaskTableDocument";

/// OAuth scope for reading and editing Google Docs.
pub const DOCUMENTS_SCOPE: &str = "https://www.googleapis.com/auth/documents";

/// Where service-account credentials come from, when configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceAccountKey {
    /// Path to the downloaded JSON key.
    File(String),
    /// The JSON key itself.
    Inline(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub source_url: String,
    pub table_selector: String,
    pub credentials_path: String,
    pub token_path: String,
    pub document_id_path: String,
    pub document_title: String,
    pub service_account: Option<ServiceAccountKey>,
}

impl SyncConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset and blank values fall back
    /// to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        // A key file path wins over inline JSON.
        let service_account = get("GOOGLE_SERVICE_ACCOUNT_KEY")
            .map(ServiceAccountKey::File)
            .or_else(|| get("GOOGLE_SERVICE_ACCOUNT_JSON").map(ServiceAccountKey::Inline));

        Self {
            source_url: or("TABLE_SYNC_SOURCE_URL", DEFAULT_SOURCE_URL),
            table_selector: or("TABLE_SYNC_TABLE_SELECTOR", DEFAULT_TABLE_SELECTOR),
            credentials_path: or("TABLE_SYNC_CREDENTIALS_PATH", DEFAULT_CREDENTIALS_PATH),
            token_path: or("TABLE_SYNC_TOKEN_PATH", DEFAULT_TOKEN_PATH),
            document_id_path: or("TABLE_SYNC_DOCUMENT_ID_PATH", DEFAULT_DOCUMENT_ID_PATH),
            document_title: or("TABLE_SYNC_DOCUMENT_TITLE", DEFAULT_DOCUMENT_TITLE),
            service_account,
        }
    }
}
