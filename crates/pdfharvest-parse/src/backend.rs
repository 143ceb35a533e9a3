//! PDF parsing backend trait.
//!
//! Defines the [`PdfBackend`] trait that abstracts the few reads pdfharvest
//! needs from a PDF library: page count, per-page text, per-page image
//! resources and the document /Info dictionary.

use pdfharvest_core::{DocumentMetadata, ExtractResult, ImageResource, PdfError};

/// Trait abstracting PDF parsing operations.
///
/// # Associated Types
///
/// - `Document`: The parsed PDF document representation.
/// - `Page`: A reference to a single page within a document.
/// - `Error`: Backend-specific error type, convertible to [`PdfError`].
///
/// # Usage
///
/// ```ignore
/// let doc = MyBackend::open(pdf_bytes)?;
/// let page = MyBackend::get_page(&doc, 0)?;
/// let text = MyBackend::page_text(&doc, &page)?;
/// let images = MyBackend::page_images(&doc, &page)?;
/// ```
pub trait PdfBackend {
    /// The parsed PDF document type.
    type Document;

    /// A reference to a single page within a document.
    type Page;

    /// Backend-specific error type, convertible to [`PdfError`].
    type Error: std::error::Error + Into<PdfError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not represent a valid PDF document,
    /// or if the document is encrypted.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Parse PDF bytes, decrypting with `password` if the document is
    /// encrypted.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid PDF or the password
    /// is wrong.
    fn open_with_password(bytes: &[u8], password: &str) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Access a page by 0-based index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error>;

    /// Extract the plain text of a page, lines separated by `\n`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page content cannot be decoded.
    fn page_text(doc: &Self::Document, page: &Self::Page) -> Result<String, Self::Error>;

    /// Collect the image XObjects listed in a page's resource dictionary.
    ///
    /// XObjects that cannot be read individually are reported as warnings
    /// and left out; an error is only returned when the resource
    /// dictionary itself cannot be resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the page's /Resources cannot be resolved.
    fn page_images(
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<ExtractResult<Vec<ImageResource>>, Self::Error>;

    /// Extract document-level metadata from the PDF /Info dictionary.
    ///
    /// Fields not present in the PDF are returned as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the /Info dictionary exists but is malformed.
    fn document_metadata(doc: &Self::Document) -> Result<DocumentMetadata, Self::Error>;
}
