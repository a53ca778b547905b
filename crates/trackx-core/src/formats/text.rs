use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::formats::validation::FormatValidator;
use crate::formats::{DocumentReader, DocumentText, FormatValidation};

/// Plain text reader for .txt and .log tracking exports
pub struct TextReader;

impl DocumentReader for TextReader {
    fn read(&self, path: &Path) -> Result<DocumentText> {
        let text = fs::read_to_string(path)?;

        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("unnamed").to_string();

        Ok(DocumentText { name, format_name: "Text".to_string(), pages: vec![text] })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt", "log"]
    }

    fn format_name(&self) -> &str {
        "Text"
    }

    fn validate(&self, path: &Path) -> Result<FormatValidation> {
        let mut validation = FormatValidator::validate_file_exists(path);
        if !validation.is_valid() {
            return Ok(validation);
        }

        let utf8 = FormatValidator::validate_utf8(path);
        validation.errors.extend(utf8.errors);

        Ok(validation)
    }
}
