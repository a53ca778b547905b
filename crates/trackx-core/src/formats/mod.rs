//! Format abstraction layer for multi-format support
//!
//! Each text-bearing input format implements the `DocumentReader` trait,
//! and the `DocumentRegistry` manages format detection and dispatching to
//! the appropriate reader. CSV tracking exports carry structured rows
//! rather than prose, so they bypass the registry and go through
//! [`csv::ingest_csv`] directly.

use std::path::Path;

use crate::error::{Result, TrackxError};

pub mod csv;
pub mod pdf;
pub mod text;
pub mod validation;

pub use pdf::PdfReader;
pub use text::TextReader;

/// Document reader trait that all format implementations must implement
pub trait DocumentReader: Send + Sync {
    /// Read a document from the given path
    ///
    /// # Arguments
    /// * `path` - Path to the file to read
    ///
    /// # Returns
    /// A `DocumentText` containing the page-split extracted text
    fn read(&self, path: &Path) -> Result<DocumentText>;

    /// Get supported file extensions (e.g., ["pdf"])
    fn supported_extensions(&self) -> &[&str];

    /// Get human-readable format name (e.g., "PDF")
    fn format_name(&self) -> &str;

    /// Validate file structure without full read (optional)
    ///
    /// This allows format readers to perform quick validation checks
    /// before attempting a full read operation.
    fn validate(&self, _path: &Path) -> Result<FormatValidation> {
        // Default implementation: no validation errors or warnings
        Ok(FormatValidation::default())
    }
}

/// Result of format validation
#[derive(Debug, Clone, Default)]
pub struct FormatValidation {
    /// Validation errors that prevent reading
    pub errors: Vec<String>,

    /// Warnings that don't prevent reading but indicate potential issues
    pub warnings: Vec<String>,
}

impl FormatValidation {
    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Text extracted by a document reader, split into pages where the
/// format has a page concept
#[derive(Debug, Clone)]
pub struct DocumentText {
    /// Document name, usually the file stem
    pub name: String,

    /// Format name (e.g., "PDF", "Text")
    pub format_name: String,

    /// Page texts in document order; flat formats produce one page
    pub pages: Vec<String>,
}

impl DocumentText {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The whole document as one newline-joined block
    pub fn full_text(&self) -> String {
        self.pages.join("\n")
    }
}

/// Central registry for document readers
///
/// The registry maintains a collection of readers and provides format
/// detection based on file extensions.
pub struct DocumentRegistry {
    readers: Vec<Box<dyn DocumentReader>>,
}

impl DocumentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { readers: Vec::new() }
    }

    /// Registry with the built-in readers registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PdfReader));
        registry.register(Box::new(TextReader));
        registry
    }

    /// Register a document reader
    pub fn register(&mut self, reader: Box<dyn DocumentReader>) {
        self.readers.push(reader);
    }

    /// Detect format and return the appropriate reader
    ///
    /// # Arguments
    /// * `path` - Path to the file
    ///
    /// # Returns
    /// Reference to the reader that supports this file extension
    pub fn detect_format(&self, path: &Path) -> Result<&dyn DocumentReader> {
        let extension = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            TrackxError::UnsupportedFormat {
                extension: "none".to_string(),
                supported: self.supported_formats(),
            }
        })?;

        self.readers
            .iter()
            .find(|r| r.supported_extensions().contains(&extension))
            .map(|r| r.as_ref())
            .ok_or_else(|| TrackxError::UnsupportedFormat {
                extension: extension.to_string(),
                supported: self.supported_formats(),
            })
    }

    /// Get list of all supported format extensions
    pub fn supported_formats(&self) -> Vec<String> {
        self.readers
            .iter()
            .flat_map(|r| r.supported_extensions())
            .map(|s| s.to_string())
            .collect()
    }

    /// Get all registered readers
    pub fn readers(&self) -> &[Box<dyn DocumentReader>] {
        &self.readers
    }
}

impl Default for DocumentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
