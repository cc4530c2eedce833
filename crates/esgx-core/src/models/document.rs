//! Page text handed to the extraction engine.

/// Form feed, the page break emitted by `pdftotext`.
pub const PAGE_BREAK: char = '\u{000c}';

/// One page of plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Page number (1-indexed).
    pub number: u32,
    /// Plain text of the page as the text layer or input file gives it.
    pub text: String,
}

impl PageText {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The ordered pages of one document plus the name it was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentText {
    /// File name or path, used for company/year fallbacks.
    pub source_file: String,
    /// Pages in reading order.
    pub pages: Vec<PageText>,
}

impl DocumentText {
    /// Number pages 1..=n in the given order.
    pub fn from_pages<I, S>(source_file: impl Into<String>, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageText::new(i as u32 + 1, text))
            .collect();
        Self {
            source_file: source_file.into(),
            pages,
        }
    }

    /// Split plain text into pages on form feeds.
    ///
    /// A trailing form feed does not open an empty final page.
    pub fn from_plain_text(source_file: impl Into<String>, text: &str) -> Self {
        let text = text.strip_suffix(PAGE_BREAK).unwrap_or(text);
        Self::from_pages(source_file, text.split(PAGE_BREAK))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// True when no page carries any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(PageText::is_blank)
    }

    /// All page texts joined by newlines.
    pub fn full_text(&self) -> String {
        self.leading_text(self.pages.len())
    }

    /// Texts of the first `pages` pages joined by newlines.
    pub fn leading_text(&self, pages: usize) -> String {
        self.pages
            .iter()
            .take(pages)
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
