// Auth infra layer.
// - `google_auth.rs` wraps yup-oauth2 (consent flow or service account).
// - `console_prompt.rs` asks the user for the authorization code.

pub mod console_prompt;
pub mod google_auth;

pub use console_prompt::ConsoleCodePrompt;
pub use google_auth::GoogleAuth;
