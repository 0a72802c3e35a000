//! PDF text extraction for the profile document.

use std::path::Path;

use anyhow::{anyhow, Result};

/// Extracts the document's text as one string: per-page text in page order,
/// joined with newlines. A one-page document yields its page text unchanged.
///
/// Parse failures are fatal; there is no partial extraction.
pub fn extract_text(path: &Path) -> Result<String> {
    let pages = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| anyhow!("Failed to extract text from {}: {e}", path.display()))?;

    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages.join("\n")
}
