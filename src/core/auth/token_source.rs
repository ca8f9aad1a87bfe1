use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unable to read client secret file: {0}")]
    Secrets(String),
    #[error("Unable to read authorization code: {0}")]
    Prompt(String),
    #[error("Unable to set up authenticator: {0}")]
    Setup(String),
    #[error("Unable to retrieve token from web: {0}")]
    Token(String),
}

/// Anything that can hand out a bearer token for API calls.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, AuthError>;
}

/// Obtains an authorization code for a given consent URL. The console prompt
/// is one implementation; headless setups can plug in something else.
#[async_trait]
pub trait AuthCodePrompt: Send + Sync {
    async fn request_code(&self, authorization_url: &str) -> Result<String, AuthError>;
}
