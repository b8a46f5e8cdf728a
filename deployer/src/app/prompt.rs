//! Operator prompts

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::errors::DeployError;

/// Asks the operator for a line of input
#[async_trait]
pub trait Prompt: Send + Sync {
    async fn ask(&self, message: &str) -> Result<String, DeployError>;
}

/// Prompt reading from stdin
#[derive(Debug, Default)]
pub struct StdinPrompt;

#[async_trait]
impl Prompt for StdinPrompt {
    async fn ask(&self, message: &str) -> Result<String, DeployError> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(format!("{}: ", message).as_bytes()).await?;
        stdout.flush().await?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        Ok(line.trim().to_string())
    }
}

/// Prompt answering with a fixed reply
#[derive(Debug, Clone)]
pub struct FixedPrompt(pub String);

#[async_trait]
impl Prompt for FixedPrompt {
    async fn ask(&self, _message: &str) -> Result<String, DeployError> {
        Ok(self.0.clone())
    }
}
