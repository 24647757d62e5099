// src/download/naming.rs
// =============================================================================
// Builds the stored file name of a PDF.
//
// The name is the last path segment of the URL with a random token slipped
// in between stem and extension:
//
//   https://example.com/files/report.pdf -> report_<uuid>.pdf
//
// Two different PDFs that happen to share a file name therefore never land
// on the same key.
// =============================================================================

use uuid::Uuid;

/// Stored file name for the PDF at `pdf_url`, with a fresh random token
pub fn artifact_name(pdf_url: &str) -> String {
    with_token(pdf_url, &Uuid::new_v4().to_string())
}

// Deterministic half of artifact_name, split out so the shape is testable
fn with_token(pdf_url: &str, token: &str) -> String {
    let segment = pdf_url.rsplit('/').next().unwrap_or(pdf_url);

    match segment.rfind('.') {
        Some(dot) => format!("{}_{}{}", &segment[..dot], token, &segment[dot..]),
        None => format!("{}_{}", segment, token),
    }
}

/// Joins a key prefix (possibly empty) and a file name
pub fn artifact_key(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}
