use std::path::Path;

use crate::error::{Result, TrackxError};
use crate::formats::validation::FormatValidator;
use crate::formats::{DocumentReader, DocumentText, FormatValidation};

/// PDF format reader
///
/// Tracking reports usually arrive as PDF exports from fleet platforms.
/// Text extraction keeps page boundaries so the extractor can fall back
/// to per-page scanning when a document-wide scan finds nothing.
pub struct PdfReader;

impl DocumentReader for PdfReader {
    fn read(&self, path: &Path) -> Result<DocumentText> {
        let text = pdf_extract::extract_text(path).map_err(|e| TrackxError::Pdf {
            path: path.to_path_buf(),
            reason: format!("Failed to extract text: {}", e),
        })?;

        // Handle empty PDFs with warning
        if text.trim().is_empty() {
            tracing::warn!("PDF contains no extractable text: {}", path.display());
        }

        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("unnamed").to_string();

        Ok(DocumentText { name, format_name: "PDF".to_string(), pages: split_pages(&text) })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn format_name(&self) -> &str {
        "PDF"
    }

    fn validate(&self, path: &Path) -> Result<FormatValidation> {
        let mut validation = FormatValidator::validate_file_exists(path);
        if !validation.is_valid() {
            return Ok(validation);
        }

        // Try to extract text to validate PDF structure
        match pdf_extract::extract_text(path) {
            Ok(text) => {
                if text.trim().is_empty() {
                    validation.warnings.push(
                        "PDF contains no extractable text (may be image-based or empty)"
                            .to_string(),
                    );
                }
            }
            Err(e) => {
                validation.errors.push(format!("Invalid or corrupted PDF: {}", e));
            }
        }

        Ok(validation)
    }
}

/// Split extracted text on form feed characters, the page separator
/// pdf-extract emits. Text without form feeds is a single page.
fn split_pages(text: &str) -> Vec<String> {
    text.split('\x0C').map(|page| page.to_string()).collect()
}
