//! Downloads the profile PDF from the public file host to local temp storage.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Builds the direct-download URL for a publicly shared Drive file.
fn download_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={file_id}")
}

/// Fetches the document in a single attempt and writes it to a uniquely
/// named `.pdf` temp file, returning its path.
///
/// No retry: a failed download aborts startup. The temp file is deliberately
/// kept rather than deleted on drop; it is only read back once during
/// extraction and OS temp cleanup reclaims it eventually.
pub async fn download_document(client: &reqwest::Client, file_id: &str) -> Result<PathBuf> {
    let url = download_url(file_id);

    let response = client
        .get(&url)
        .send()
        .await
        .context("Failed to reach the document host")?
        .error_for_status()
        .context("Document host returned an error status")?;

    let bytes = response
        .bytes()
        .await
        .context("Failed to read document body")?;

    let mut file = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile()
        .context("Failed to create temp file for profile document")?;

    file.write_all(&bytes)
        .context("Failed to write profile document to temp storage")?;

    let (_, path) = file
        .keep()
        .context("Failed to persist profile document temp file")?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_url_embeds_file_id() {
        assert_eq!(
            download_url("abc123"),
            "https://drive.google.com/uc?export=download&id=abc123"
        );
    }
}
