//! File-based entry point for batch use.

use crate::extractor::parse_resume;
use crate::llm::{create_client, ChatModel, ClientConfig, LlmError};
use crate::record::ResumeRecord;
use std::path::Path;
use tracing::debug;

/// Parse the resume stored at `path` with a freshly built client.
///
/// The file is read before any client is created, so a missing file fails
/// with [`LlmError::Io`] without touching the network.
pub async fn parse_resume_file(
    path: impl AsRef<Path>,
    config: &ClientConfig,
) -> Result<ResumeRecord, LlmError> {
    let resume_text = read_resume(path.as_ref()).await?;
    let client = create_client(config)?;
    parse_resume(&resume_text, &client).await
}

/// Parse the resume stored at `path` with an existing model handle.
pub async fn parse_resume_file_with<M>(
    path: impl AsRef<Path>,
    model: &M,
) -> Result<ResumeRecord, LlmError>
where
    M: ChatModel + ?Sized,
{
    let resume_text = read_resume(path.as_ref()).await?;
    parse_resume(&resume_text, model).await
}

async fn read_resume(path: &Path) -> Result<String, LlmError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LlmError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}
