//! Turning files on disk into per-page text.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EsgxError, Result};
use crate::models::config::PdfConfig;
use crate::models::document::DocumentText;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Document formats that can be read into page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    /// UTF-8 text with form feeds between pages.
    PlainText,
}

impl DocumentKind {
    /// Kind of `path`, judged by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" | "text" => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Read a document into pages.
///
/// The returned `source_file` is the path as given.
pub fn load_document(path: &Path, config: &PdfConfig) -> Result<DocumentText> {
    let kind = DocumentKind::from_path(path)
        .ok_or_else(|| EsgxError::UnsupportedDocument(path.display().to_string()))?;
    let source_file = path.display().to_string();

    info!("Reading {:?} document {}", kind, source_file);

    let document = match kind {
        DocumentKind::Pdf => {
            let data = fs::read(path)?;
            load_pdf_bytes(source_file, &data, config)?
        }
        DocumentKind::PlainText => {
            let text = fs::read_to_string(path)?;
            let mut document = DocumentText::from_plain_text(source_file, &text);
            if config.max_pages > 0 {
                document.pages.truncate(config.max_pages);
            }
            document
        }
    };

    debug!(
        "{}: {} pages, {} characters",
        document.source_file,
        document.page_count(),
        document.pages.iter().map(|p| p.text.len()).sum::<usize>()
    );

    Ok(document)
}

/// Read an in-memory PDF into pages.
pub fn load_pdf_bytes(
    source_file: impl Into<String>,
    data: &[u8],
    config: &PdfConfig,
) -> Result<DocumentText> {
    let mut extractor = PdfExtractor::new().with_max_pages(config.max_pages);
    extractor.load(data)?;
    let pages = extractor.extract_page_texts()?;
    Ok(DocumentText::from_pages(source_file, pages))
}
