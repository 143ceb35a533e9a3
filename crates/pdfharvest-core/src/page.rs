//! Page-level data transfer types.
//!
//! [`Page`] and [`ImageResource`] are the read-only view a parsing backend
//! hands to the classifier and the image extractor. [`PageRecord`] is what
//! comes out the other side.

use std::path::PathBuf;

use crate::images::ImageFormat;

/// A raw image XObject found in a page's resource dictionary.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageResource {
    /// Resource name (e.g., "Im0").
    pub name: String,
    /// Name of the last filter in the stream's `/Filter` chain, or an
    /// empty string when the stream is unfiltered.
    pub filter_name: String,
    /// `/Width` in pixels.
    pub width: u32,
    /// `/Height` in pixels.
    pub height: u32,
    /// `/BitsPerComponent`, if present.
    pub bits_per_component: Option<u32>,
    /// `/ColorSpace` name, if it is a plain name.
    pub color_space: Option<String>,
    /// Decoded samples for lossless filters, stream content otherwise.
    pub raw_bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageResource")
            .field("name", &self.name)
            .field("filter_name", &self.filter_name)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bits_per_component", &self.bits_per_component)
            .field("color_space", &self.color_space)
            .field("raw_bytes_len", &self.raw_bytes.len())
            .finish()
    }
}

/// One page of a document, as read by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub page_number: usize,
    /// Plain extracted text, lines separated by `\n`.
    pub raw_text: String,
    /// Image XObjects in resource-dictionary order.
    pub images: Vec<ImageResource>,
}

/// An image written by the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedImage {
    /// Where the sink stored the file.
    pub path: PathBuf,
    /// Per-page sequential index, in the configured numbering base.
    pub index: usize,
    /// Container format of the file.
    pub format: ImageFormat,
}

/// The merged output for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRecord {
    /// Page number in the configured numbering base.
    pub page_number: usize,
    /// Number of pages in the document.
    pub total_pages: usize,
    /// Detected or fallback chapter.
    pub chapter: String,
    /// Detected or fallback subsection.
    pub subsection: String,
    /// Body lines joined with `\n`.
    pub body_text: String,
    /// Saved image files, in extraction order.
    pub image_paths: Vec<PathBuf>,
}

impl PageRecord {
    /// Contents of the page's text file.
    pub fn text_file_contents(&self) -> String {
        format!(
            "Chapter: {}\nSubsection: {}\n\n{}",
            self.chapter, self.subsection, self.body_text
        )
    }
}

/// Name of the text file written for page `page_number`.
pub fn page_text_file_name(page_number: usize) -> String {
    format!("page_{page_number}.txt")
}
