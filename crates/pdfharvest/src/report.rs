//! JSON report over harvested pages.
//!
//! The layout is the one served by `POST /parse_pdf`:
//!
//! ```json
//! {
//!   "results": [
//!     { "page_content": "...", "metadata": { "source": "book.pdf", "page": 1, ... } }
//!   ],
//!   "all_image_files": ["out/page_1_img_1.png"]
//! }
//! ```

use pdfharvest_core::{DocumentMetadata, PageRecord};
use serde::{Deserialize, Serialize};

/// Per-page metadata in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Name the document was submitted under.
    pub source: String,
    /// Path the document was read from.
    pub file_path: String,
    /// Page number in the configured numbering base.
    pub page: usize,
    /// Number of pages in the document.
    pub total_pages: usize,
    /// Detected or fallback chapter.
    pub chapter: String,
    /// Detected or fallback subsection.
    pub subsection: String,
    /// Image files saved for this page.
    pub images: Vec<String>,
    /// Document /Info fields, flattened into the page metadata.
    #[serde(flatten)]
    pub document: DocumentMetadata,
}

/// One entry of `results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Body text of the page.
    pub page_content: String,
    /// Page and document metadata.
    pub metadata: PageMetadata,
}

/// The whole report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// One entry per harvested page.
    pub results: Vec<ReportEntry>,
    /// Every saved image file, in page order.
    pub all_image_files: Vec<String>,
}

impl Report {
    /// Build a report from harvested records.
    pub fn new(
        source: &str,
        file_path: &str,
        records: &[PageRecord],
        document: &DocumentMetadata,
    ) -> Self {
        let mut report = Report::default();
        for record in records {
            let images: Vec<String> = record
                .image_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            report.all_image_files.extend(images.iter().cloned());
            report.results.push(ReportEntry {
                page_content: record.body_text.clone(),
                metadata: PageMetadata {
                    source: source.to_string(),
                    file_path: file_path.to_string(),
                    page: record.page_number,
                    total_pages: record.total_pages,
                    chapter: record.chapter.clone(),
                    subsection: record.subsection.clone(),
                    images,
                    document: document.clone(),
                },
            });
        }
        report
    }

    /// Serialize as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
