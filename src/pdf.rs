//! PDF validation and text extraction.
//!
//! Extraction tries two independent decoders: `pdf-extract` over the whole
//! document first, then a per-page `lopdf` pass as fallback. A page that fails
//! to decode is logged and skipped rather than failing the document; the
//! extraction only errors when neither method yields enough text to be worth
//! summarizing.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Minimum extracted characters for a document to count as readable.
const MIN_TEXT_CHARS: usize = 100;
/// Maximum accepted PDF size in megabytes.
const MAX_FILE_SIZE_MB: u64 = 50;

/// Errors raised while validating or extracting a PDF.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The path does not exist.
    #[error("PDF file not found: {0}")]
    FileNotFound(PathBuf),
    /// The file is not a PDF (wrong extension or missing `%PDF` header).
    #[error("File is not a PDF document: {0}")]
    NotAPdf(PathBuf),
    /// The file exceeds the size limit.
    #[error("File size {size_mb} MB exceeds the {limit_mb} MB limit")]
    TooLarge {
        /// Observed file size in megabytes.
        size_mb: u64,
        /// Configured limit in megabytes.
        limit_mb: u64,
    },
    /// No extraction method produced enough text.
    #[error("Insufficient text extracted: {chars} characters (minimum {minimum})")]
    InsufficientText {
        /// Characters recovered by the best method.
        chars: usize,
        /// Minimum characters required.
        minimum: usize,
    },
    /// The document structure could not be parsed at all.
    #[error("Failed to parse PDF: {0}")]
    Parse(String),
    /// Filesystem failure while reading the document.
    #[error("Failed to read PDF file: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracts text from PDF files using multiple decoding strategies.
pub struct PdfExtractor {
    min_text_chars: usize,
    max_file_size_mb: u64,
}

impl PdfExtractor {
    /// Build an extractor with the default thresholds.
    pub fn new() -> Self {
        Self {
            min_text_chars: MIN_TEXT_CHARS,
            max_file_size_mb: MAX_FILE_SIZE_MB,
        }
    }

    /// Extract text from a PDF, preferring whole-document decoding and
    /// falling back to page-by-page extraction.
    pub fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        self.validate(path)?;

        match pdf_extract::extract_text(path) {
            Ok(text) if text.trim().len() >= self.min_text_chars => {
                tracing::info!(path = %path.display(), "Extracted text with pdf-extract");
                return Ok(text);
            }
            Ok(text) => {
                tracing::debug!(
                    path = %path.display(),
                    chars = text.trim().len(),
                    "pdf-extract yielded too little text, trying per-page fallback"
                );
            }
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "pdf-extract failed, trying per-page fallback"
                );
            }
        }

        let fallback = self.extract_per_page(path)?;
        let chars = fallback.trim().len();
        if chars >= self.min_text_chars {
            tracing::info!(path = %path.display(), "Extracted text with per-page fallback");
            Ok(fallback)
        } else {
            Err(ExtractionError::InsufficientText {
                chars,
                minimum: self.min_text_chars,
            })
        }
    }

    /// Number of pages in the document.
    pub fn page_count(&self, path: &Path) -> Result<usize, ExtractionError> {
        let document =
            lopdf::Document::load(path).map_err(|error| ExtractionError::Parse(error.to_string()))?;
        Ok(document.get_pages().len())
    }

    /// Per-page extraction via lopdf; failed pages are skipped with a warning.
    fn extract_per_page(&self, path: &Path) -> Result<String, ExtractionError> {
        let document =
            lopdf::Document::load(path).map_err(|error| ExtractionError::Parse(error.to_string()))?;

        let mut pages = Vec::new();
        for (page_number, _object_id) in document.get_pages() {
            match document.extract_text(&[page_number]) {
                Ok(text) if !text.trim().is_empty() => pages.push(text),
                Ok(_) => {}
                Err(error) => {
                    tracing::warn!(
                        page = page_number,
                        error = %error,
                        "Skipping page that failed to decode"
                    );
                }
            }
        }

        Ok(pages.join("\n\n"))
    }

    fn validate(&self, path: &Path) -> Result<(), ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::FileNotFound(path.to_path_buf()));
        }

        let is_pdf_extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("pdf"));
        if !is_pdf_extension {
            return Err(ExtractionError::NotAPdf(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path)?;
        let size_mb = metadata.len() / (1024 * 1024);
        if size_mb > self.max_file_size_mb {
            return Err(ExtractionError::TooLarge {
                size_mb,
                limit_mb: self.max_file_size_mb,
            });
        }

        let mut header = [0u8; 4];
        File::open(path)?.read_exact(&mut header).map_err(|_| {
            ExtractionError::NotAPdf(path.to_path_buf())
        })?;
        if &header != b"%PDF" {
            return Err(ExtractionError::NotAPdf(path.to_path_buf()));
        }

        Ok(())
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_rejected() {
        let error = PdfExtractor::new()
            .extract_text(Path::new("does-not-exist.pdf"))
            .expect_err("missing file");
        assert!(matches!(error, ExtractionError::FileNotFound(_)));
    }

    #[test]
    fn non_pdf_extension_is_rejected() {
        let file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .expect("temp file");
        let error = PdfExtractor::new()
            .extract_text(file.path())
            .expect_err("wrong extension");
        assert!(matches!(error, ExtractionError::NotAPdf(_)));
    }

    #[test]
    fn pdf_extension_without_pdf_header_is_rejected() {
        let mut file = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .expect("temp file");
        file.write_all(b"plain text masquerading as a pdf")
            .expect("write");
        let error = PdfExtractor::new()
            .extract_text(file.path())
            .expect_err("bad header");
        assert!(matches!(error, ExtractionError::NotAPdf(_)));
    }
}
