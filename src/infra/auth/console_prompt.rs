use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::core::auth::{AuthCodePrompt, AuthError};

/// Asks the user on the terminal to open the consent URL and paste the code.
pub struct ConsoleCodePrompt;

#[async_trait]
impl AuthCodePrompt for ConsoleCodePrompt {
    async fn request_code(&self, authorization_url: &str) -> Result<String, AuthError> {
        println!(
            "Go to the following link in your browser then type the authorization code: \n{}",
            authorization_url
        );

        read_code(BufReader::new(tokio::io::stdin())).await
    }
}

async fn read_code<R: AsyncBufRead + Unpin>(mut reader: R) -> Result<String, AuthError> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .await
        .map_err(|e| AuthError::Prompt(e.to_string()))?;

    if read == 0 {
        return Err(AuthError::Prompt("stdin closed".to_string()));
    }

    Ok(line.trim().to_string())
}
