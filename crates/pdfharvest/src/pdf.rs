//! Top-level PDF document type for opening and reading pages.

use pdfharvest_core::{
    DocumentMetadata, ExtractOptions, ExtractResult, ExtractWarning, ExtractWarningCode, Page,
    PdfError,
};
use pdfharvest_parse::{LopdfBackend, LopdfDocument, PdfBackend};

/// A PDF document opened for harvesting.
///
/// # Example
///
/// ```ignore
/// let pdf = Pdf::open(bytes, None)?;
/// let page = pdf.read_page(0)?;
/// println!("{}", page.value.raw_text);
/// ```
pub struct Pdf {
    doc: LopdfDocument,
    options: ExtractOptions,
    /// Cached document metadata from the /Info dictionary.
    metadata: DocumentMetadata,
}

impl Pdf {
    /// Open a PDF document from bytes.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Raw PDF file bytes.
    /// * `options` - Extraction options. Uses defaults if `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::ResourceLimitExceeded`] if `bytes` is larger than
    /// `max_input_bytes`, [`PdfError::PasswordRequired`] if the PDF is
    /// encrypted, and [`PdfError::ParseError`] if it is not a valid PDF.
    pub fn open(bytes: &[u8], options: Option<ExtractOptions>) -> Result<Self, PdfError> {
        let options = options.unwrap_or_default();
        check_input_size(bytes, &options)?;
        let doc = LopdfBackend::open(bytes).map_err(PdfError::from)?;
        Self::from_doc(doc, options)
    }

    /// Open an encrypted PDF document from bytes with a password.
    ///
    /// If the PDF is not encrypted, the password is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidPassword`] if the password is incorrect.
    /// Returns [`PdfError`] if the bytes are not a valid PDF document.
    pub fn open_with_password(
        bytes: &[u8],
        password: &str,
        options: Option<ExtractOptions>,
    ) -> Result<Self, PdfError> {
        let options = options.unwrap_or_default();
        check_input_size(bytes, &options)?;
        let doc = LopdfBackend::open_with_password(bytes, password).map_err(PdfError::from)?;
        Self::from_doc(doc, options)
    }

    fn from_doc(doc: LopdfDocument, options: ExtractOptions) -> Result<Self, PdfError> {
        let metadata = LopdfBackend::document_metadata(&doc).map_err(PdfError::from)?;
        Ok(Self {
            doc,
            options,
            metadata,
        })
    }

    /// Return the number of pages in the document.
    pub fn page_count(&self) -> usize {
        LopdfBackend::page_count(&self.doc)
    }

    /// Return the document metadata from the PDF /Info dictionary.
    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// The options this document was opened with.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Read a page by 0-based index, degrading instead of failing.
    ///
    /// When the text or the image resources of the page cannot be read,
    /// that part is left empty and a [`ExtractWarningCode::PageReadFailed`]
    /// warning is recorded. Warnings about individual XObjects are passed
    /// through. Warnings carry the 1-based page number.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] only if the index is out of range.
    pub fn read_page(&self, index: usize) -> Result<ExtractResult<Page>, PdfError> {
        let lopdf_page = LopdfBackend::get_page(&self.doc, index).map_err(PdfError::from)?;
        let page_number = index + 1;
        let mut warnings = Vec::new();

        let raw_text = match LopdfBackend::page_text(&self.doc, &lopdf_page) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "could not read page text");
                warnings.push(
                    ExtractWarning::with_code(
                        ExtractWarningCode::PageReadFailed,
                        format!("could not read page text: {e}"),
                    )
                    .on_page(page_number),
                );
                String::new()
            }
        };

        let images = match LopdfBackend::page_images(&self.doc, &lopdf_page) {
            Ok(result) => {
                warnings.extend(result.warnings.into_iter().map(|w| w.on_page(page_number)));
                result.value
            }
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "could not read page resources");
                warnings.push(
                    ExtractWarning::with_code(
                        ExtractWarningCode::PageReadFailed,
                        format!("could not read page resources: {e}"),
                    )
                    .on_page(page_number),
                );
                Vec::new()
            }
        };

        Ok(ExtractResult::with_warnings(
            Page {
                page_number,
                raw_text,
                images,
            },
            warnings,
        ))
    }
}

impl std::fmt::Debug for Pdf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pdf")
            .field("page_count", &self.page_count())
            .field("options", &self.options)
            .field("metadata", &self.metadata)
            .finish()
    }
}

fn check_input_size(bytes: &[u8], options: &ExtractOptions) -> Result<(), PdfError> {
    if let Some(max_bytes) = options.max_input_bytes {
        if bytes.len() > max_bytes {
            return Err(PdfError::ResourceLimitExceeded {
                limit_name: "max_input_bytes".to_string(),
                limit_value: max_bytes,
                actual_value: bytes.len(),
            });
        }
    }
    Ok(())
}
