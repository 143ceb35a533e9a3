//! The page loop tying classification and image extraction together.

use pdfharvest_core::{
    ExtractResult, PageClassifier, PageRecord, PdfError, SavedImage, page_text_file_name,
};

use crate::extractor::ImageExtractor;
use crate::pdf::Pdf;
use crate::sink::ImageSink;

/// Turns the pages of a [`Pdf`] into [`PageRecord`]s.
///
/// Without a sink nothing is written: records carry the classification
/// only and `image_paths` stays empty. With a sink, images and page text
/// files are written according to the document's [`ExtractOptions`].
///
/// [`ExtractOptions`]: pdfharvest_core::ExtractOptions
///
/// # Example
///
/// ```ignore
/// let pdf = Pdf::open(&std::fs::read("book.pdf")?, None)?;
/// let sink = DirectorySink::new("out")?;
/// let result = Harvester::new(&pdf).with_sink(&sink).harvest()?;
/// for record in &result.value {
///     println!("{}: {}", record.page_number, record.chapter);
/// }
/// ```
pub struct Harvester<'a> {
    pdf: &'a Pdf,
    classifier: PageClassifier,
    sink: Option<&'a dyn ImageSink>,
}

impl<'a> Harvester<'a> {
    /// Create a harvester using the heading strategy and fallback labels
    /// from the document's options.
    pub fn new(pdf: &'a Pdf) -> Self {
        let options = pdf.options();
        let classifier = PageClassifier::new(options.heading_strategy)
            .with_fallback_labels(options.fallback_labels.clone());
        Self {
            pdf,
            classifier,
            sink: None,
        }
    }

    /// Write extracted files into `sink`.
    pub fn with_sink(mut self, sink: &'a dyn ImageSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replace the classifier, e.g. one built around a custom matcher.
    pub fn with_classifier(mut self, classifier: PageClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Harvest every page in document order.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::IoError`] if a page text file cannot be written.
    pub fn harvest(&self) -> Result<ExtractResult<Vec<PageRecord>>, PdfError> {
        let indices: Vec<usize> = (0..self.pdf.page_count()).collect();
        self.harvest_pages(&indices)
    }

    /// Harvest the given 0-based page indices, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if an index is out of range or a page text file
    /// cannot be written.
    pub fn harvest_pages(
        &self,
        indices: &[usize],
    ) -> Result<ExtractResult<Vec<PageRecord>>, PdfError> {
        let mut records = Vec::with_capacity(indices.len());
        let mut warnings = Vec::new();
        for &index in indices {
            let result = self.harvest_page(index)?;
            records.push(result.value);
            warnings.extend(result.warnings);
        }
        Ok(ExtractResult::with_warnings(records, warnings))
    }

    /// Harvest a single page by 0-based index.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the index is out of range or the page text
    /// file cannot be written.
    pub fn harvest_page(&self, index: usize) -> Result<ExtractResult<PageRecord>, PdfError> {
        let options = self.pdf.options();
        let page_number = options.index_base.number(index);
        let total_pages = self.pdf.page_count();

        let page = self.pdf.read_page(index)?;
        let mut warnings: Vec<_> = page
            .warnings
            .into_iter()
            .map(|w| w.on_page(page_number))
            .collect();
        let page = page.value;

        let classification = self.classifier.classify(&page.raw_text);
        tracing::debug!(
            page = page_number,
            chapter = %classification.chapter,
            subsection = %classification.subsection,
            images = page.images.len(),
            "classified page"
        );

        let mut saved: Vec<SavedImage> = Vec::new();
        if let Some(sink) = self.sink {
            if options.extract_images {
                let result = ImageExtractor::new(sink, options.index_base)
                    .extract(page_number, &page.images);
                saved = result.value;
                warnings.extend(result.warnings);
            }
        }

        let record = PageRecord {
            page_number,
            total_pages,
            body_text: classification.body_text(),
            chapter: classification.chapter,
            subsection: classification.subsection,
            image_paths: saved.into_iter().map(|s| s.path).collect(),
        };

        if let Some(sink) = self.sink {
            if options.write_text_files {
                let file_name = page_text_file_name(page_number);
                sink.write(&file_name, record.text_file_contents().as_bytes())
                    .map_err(|e| PdfError::IoError(format!("could not write {file_name}: {e}")))?;
            }
        }

        Ok(ExtractResult::with_warnings(record, warnings))
    }
}
