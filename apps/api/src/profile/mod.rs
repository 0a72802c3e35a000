//! Startup pipeline for the profile document: download the PDF once,
//! extract its text once, hold the result for the process lifetime.

pub mod extract;
pub mod provision;

use anyhow::{Context, Result};
use tracing::info;

/// Fetches the profile document and extracts its text.
///
/// Runs exactly once, before the HTTP listener binds. Any failure here is
/// fatal: the service must not reach a ready state without profile text.
pub async fn load(client: &reqwest::Client, file_id: &str) -> Result<String> {
    let path = provision::download_document(client, file_id).await?;
    info!("Profile document downloaded to {}", path.display());

    // PDF parsing is CPU-bound; keep it off the async runtime threads.
    let text = tokio::task::spawn_blocking(move || extract::extract_text(&path))
        .await
        .context("PDF extraction task panicked")??;

    info!("Profile text extracted ({} chars)", text.len());
    Ok(text)
}
