//! Options controlling a harvesting run.

use crate::classify::{FallbackLabels, HeadingStrategy};

/// Numbering base for page numbers and per-page image indices.
///
/// Applies to [`PageRecord::page_number`](crate::PageRecord::page_number),
/// to the page field of the JSON report and to the generated file names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum IndexBase {
    /// Count from 0.
    Zero,
    /// Count from 1.
    #[default]
    One,
}

impl IndexBase {
    /// The first number in this base.
    pub fn offset(self) -> usize {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }

    /// Convert a 0-based position into a number in this base.
    pub fn number(self, position: usize) -> usize {
        position + self.offset()
    }
}

/// Options controlling extraction behavior.
///
/// Provides sensible defaults for all settings.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Heading detection rule applied to each page (default: Pattern).
    pub heading_strategy: HeadingStrategy,
    /// Labels used when a page has too few lines to fall back on
    /// (default: "Unknown Chapter" / "Unknown Subsection").
    pub fallback_labels: FallbackLabels,
    /// Numbering base for pages and images (default: One).
    pub index_base: IndexBase,
    /// Whether to extract embedded images (default: true).
    pub extract_images: bool,
    /// Whether to write one `page_<N>.txt` file per page (default: true).
    pub write_text_files: bool,
    /// Maximum input PDF size in bytes (default: None = no limit).
    pub max_input_bytes: Option<usize>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            heading_strategy: HeadingStrategy::Pattern,
            fallback_labels: FallbackLabels::default(),
            index_base: IndexBase::One,
            extract_images: true,
            write_text_files: true,
            max_input_bytes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = ExtractOptions::default();
        assert_eq!(opts.heading_strategy, HeadingStrategy::Pattern);
        assert_eq!(opts.index_base, IndexBase::One);
        assert_eq!(opts.fallback_labels.chapter, "Unknown Chapter");
        assert!(opts.extract_images);
        assert!(opts.write_text_files);
        assert_eq!(opts.max_input_bytes, None);
    }

    #[test]
    fn index_base_numbers() {
        assert_eq!(IndexBase::Zero.number(0), 0);
        assert_eq!(IndexBase::Zero.number(4), 4);
        assert_eq!(IndexBase::One.number(0), 1);
        assert_eq!(IndexBase::One.number(4), 5);
    }
}
