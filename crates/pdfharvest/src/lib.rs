//! pdfharvest: Extract page text, chapter/subsection headings and embedded
//! images from PDF documents.
//!
//! This is the public API facade crate. It re-exports types from
//! pdfharvest-core and uses pdfharvest-parse for PDF reading.
//!
//! # Architecture
//!
//! - **pdfharvest-core**: Backend-independent data types, the heading classifier and the image filter table
//! - **pdfharvest-parse**: Page text and image resource reading via lopdf
//! - **pdfharvest** (this crate): [`Pdf`], [`ImageExtractor`], [`Harvester`] and the JSON [`Report`]
//!
//! # Example
//!
//! ```ignore
//! use pdfharvest::{DirectorySink, Harvester, Pdf};
//!
//! let bytes = std::fs::read("book.pdf")?;
//! let pdf = Pdf::open(&bytes, None)?;
//! let sink = DirectorySink::new("extracted")?;
//! let result = Harvester::new(&pdf).with_sink(&sink).harvest()?;
//! for warning in &result.warnings {
//!     eprintln!("{warning}");
//! }
//! ```

mod extractor;
mod harvester;
mod pdf;
mod report;
mod sink;

pub use extractor::{ImageExtractor, encode_png};
pub use harvester::Harvester;
pub use pdf::Pdf;
pub use report::{PageMetadata, Report, ReportEntry};
pub use sink::{DirectorySink, ImageSink, MemorySink};

pub use pdfharvest_core;
pub use pdfharvest_core::{
    Classification, DocumentMetadata, ExtractOptions, ExtractResult, ExtractWarning,
    ExtractWarningCode, FallbackLabels, FilterFamily, HeadingMatcher, HeadingStrategy,
    ImageFormat, ImageResource, IndexBase, LOSSLESS_FILTERS, LOSSY_FILTERS, Page,
    PageClassifier, PageRecord, PatternMatcher, PdfError, PixelGrid, ReshapeError, SavedImage,
    UpperCaseMatcher, classify_filter, image_file_name, page_text_file_name,
};
pub use pdfharvest_parse;

#[cfg(test)]
pub(crate) mod test_support {
    //! lopdf-built documents for unit tests.

    use std::io::Write;

    use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

    pub struct TestPage {
        lines: Vec<String>,
        images: Vec<(&'static str, Object)>,
        broken_resources: bool,
    }

    impl TestPage {
        pub fn text(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|l| l.to_string()).collect(),
                images: Vec::new(),
                broken_resources: false,
            }
        }

        pub fn with_raw_xobject(mut self, name: &'static str, obj: Object) -> Self {
            self.images.push((name, obj));
            self
        }

        pub fn with_broken_resources(mut self) -> Self {
            self.broken_resources = true;
            self
        }

        pub fn with_image(
            mut self,
            name: &'static str,
            filter: Option<&str>,
            width: i64,
            height: i64,
            content: Vec<u8>,
        ) -> Self {
            let mut dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8i64,
            };
            if let Some(filter) = filter {
                dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
            }
            self.with_raw_xobject(name, Object::Stream(Stream::new(dict, content)))
        }

        pub fn with_jpeg(self, name: &'static str, width: i64, height: i64) -> Self {
            self.with_image(
                name,
                Some("DCTDecode"),
                width,
                height,
                vec![0xFF, 0xD8, 0xFF, 0xE0, 0xFF, 0xD9],
            )
        }

        pub fn with_flate(self, name: &'static str, width: i64, height: i64, samples: &[u8]) -> Self {
            let mut encoder =
                flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(samples).unwrap();
            let content = encoder.finish().unwrap();
            self.with_image(name, Some("FlateDecode"), width, height, content)
        }
    }

    pub fn build_pdf(pages: &[TestPage]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id: ObjectId = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let content: String = page
                .lines
                .iter()
                .enumerate()
                .map(|(i, line)| format!("BT /F1 12 Tf 72 {} Td ({line}) Tj ET\n", 720 - 20 * i))
                .collect();
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

            let mut xobjects = Dictionary::new();
            for (name, obj) in &page.images {
                let id = doc.add_object(obj.clone());
                xobjects.set(*name, id);
            }

            let resources = if page.broken_resources {
                Object::Integer(7)
            } else {
                Object::Dictionary(dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                    "XObject" => xobjects,
                })
            };
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => resources,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).expect("failed to save test PDF");
        buf
    }
}
