// Google authentication backed by yup-oauth2.
//
// Two ways in:
// - installed-app consent flow: the first run asks for an authorization code
//   through an `AuthCodePrompt`; the token is then cached on disk and
//   refreshed by yup-oauth2 on later runs
// - service account: a JSON key, no prompt (the destination document must be
//   shared with the service account email)

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use yup_oauth2::authenticator_delegate::InstalledFlowDelegate;
use yup_oauth2::{
    AccessToken, InstalledFlowAuthenticator, InstalledFlowReturnMethod,
    ServiceAccountAuthenticator, ServiceAccountKey,
};

use crate::core::auth::{AccessTokenSource, AuthCodePrompt, AuthError};

type TokenFuture = Pin<Box<dyn Future<Output = Result<String, AuthError>> + Send>>;

/// Hands out access tokens for one scope from a yup-oauth2 authenticator.
pub struct GoogleAuth {
    fetch: Box<dyn Fn() -> TokenFuture + Send + Sync>,
}

impl GoogleAuth {
    /// Consent-screen flow with the token cached at `token_path`.
    pub async fn installed_flow<P: AuthCodePrompt + 'static>(
        secrets_path: impl AsRef<Path>,
        token_path: impl AsRef<Path>,
        scope: &str,
        prompt: P,
    ) -> Result<Self, AuthError> {
        let secrets_path = secrets_path.as_ref();
        let secret = yup_oauth2::read_application_secret(secrets_path)
            .await
            .map_err(|e| AuthError::Secrets(format!("{}: {}", secrets_path.display(), e)))?;

        let delegate = PromptDelegate {
            prompt,
            redirect_uri: secret.redirect_uris.first().cloned(),
        };

        let method = InstalledFlowReturnMethod::Interactive;
        let auth = InstalledFlowAuthenticator::builder(secret, method)
            .persist_tokens_to_disk(token_path.as_ref())
            .flow_delegate(Box::new(delegate))
            .build()
            .await
            .map_err(|e| AuthError::Setup(e.to_string()))?;

        let auth = Arc::new(auth);
        let scope = scope.to_string();
        Ok(Self {
            fetch: Box::new(move || -> TokenFuture {
                let auth = Arc::clone(&auth);
                let scope = scope.clone();
                Box::pin(async move { token_string(auth.token(&[scope.as_str()]).await) })
            }),
        })
    }

    /// Service account from a key file on disk.
    pub async fn service_account_file(
        key_path: impl AsRef<Path>,
        scope: &str,
    ) -> Result<Self, AuthError> {
        let key_path = key_path.as_ref();
        let key = yup_oauth2::read_service_account_key(key_path)
            .await
            .map_err(|e| AuthError::Secrets(format!("{}: {}", key_path.display(), e)))?;
        Self::service_account(key, scope).await
    }

    /// Service account from the key JSON itself.
    pub async fn service_account_json(json: &str, scope: &str) -> Result<Self, AuthError> {
        let key = yup_oauth2::parse_service_account_key(json)
            .map_err(|e| AuthError::Secrets(e.to_string()))?;
        Self::service_account(key, scope).await
    }

    async fn service_account(key: ServiceAccountKey, scope: &str) -> Result<Self, AuthError> {
        tracing::info!("Using service account {}", key.client_email);

        let auth = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| AuthError::Setup(e.to_string()))?;

        let auth = Arc::new(auth);
        let scope = scope.to_string();
        Ok(Self {
            fetch: Box::new(move || -> TokenFuture {
                let auth = Arc::clone(&auth);
                let scope = scope.clone();
                Box::pin(async move { token_string(auth.token(&[scope.as_str()]).await) })
            }),
        })
    }
}

#[async_trait]
impl AccessTokenSource for GoogleAuth {
    async fn access_token(&self) -> Result<String, AuthError> {
        (self.fetch)().await
    }
}

fn token_string(result: Result<AccessToken, yup_oauth2::Error>) -> Result<String, AuthError> {
    let token = result.map_err(|e| AuthError::Token(e.to_string()))?;
    token
        .token()
        .map(str::to_string)
        .ok_or_else(|| AuthError::Token("response carried no access token".to_string()))
}

/// Routes yup-oauth2's "show this URL, give me the code" step through an
/// `AuthCodePrompt`.
struct PromptDelegate<P> {
    prompt: P,
    redirect_uri: Option<String>,
}

impl<P: AuthCodePrompt> InstalledFlowDelegate for PromptDelegate<P> {
    fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    fn present_user_url<'a>(
        &'a self,
        url: &'a str,
        need_code: bool,
    ) -> Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>> {
        Box::pin(async move {
            let code = self
                .prompt
                .request_code(url)
                .await
                .map_err(|e| e.to_string())?;
            let code = code.trim();
            if need_code && code.is_empty() {
                return Err("empty authorization code".to_string());
            }
            Ok(code.to_string())
        })
    }
}
