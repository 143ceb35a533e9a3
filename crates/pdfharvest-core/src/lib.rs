//! pdfharvest-core: Backend-independent data types and heuristics.
//!
//! This crate provides the page and image resource types shared by the
//! pdfharvest crates, the heading classifier that splits page text into
//! chapter, subsection and body lines, and the filter table that routes
//! embedded images into the lossless or lossy extraction path.
//! It does not parse PDF files itself.

pub mod classify;
pub mod error;
pub mod images;
pub mod metadata;
pub mod options;
pub mod page;

pub use classify::{
    Classification, FallbackLabels, HeadingMatcher, HeadingStrategy, PageClassifier,
    PatternMatcher, UpperCaseMatcher,
};
pub use error::{ExtractResult, ExtractWarning, ExtractWarningCode, PdfError};
pub use images::{
    FilterFamily, ImageFormat, LOSSLESS_FILTERS, LOSSY_FILTERS, PixelGrid, ReshapeError,
    classify_filter, image_file_name,
};
pub use metadata::DocumentMetadata;
pub use options::{ExtractOptions, IndexBase};
pub use page::{ImageResource, Page, PageRecord, SavedImage, page_text_file_name};
