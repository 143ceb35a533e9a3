//! lopdf-based PDF parsing backend.
//!
//! Implements [`PdfBackend`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate. Text comes from lopdf's own text extraction; image resources are
//! read straight from each page's `/Resources/XObject` dictionary.

use std::io::Read;

use flate2::read::ZlibDecoder;
use pdfharvest_core::{
    DocumentMetadata, ExtractResult, ExtractWarning, ExtractWarningCode, FilterFamily,
    ImageResource, classify_filter,
};

use crate::backend::PdfBackend;
use crate::error::BackendError;

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Cached ordered list of page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<lopdf::ObjectId>,
}

impl LopdfDocument {
    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }

    fn from_inner(inner: lopdf::Document) -> Self {
        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let page_ids = inner.get_pages().values().copied().collect();
        Self { inner, page_ids }
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// A reference to a single page within a [`LopdfDocument`].
#[derive(Debug, Clone, Copy)]
pub struct LopdfPage {
    /// The lopdf object ID for this page.
    pub object_id: lopdf::ObjectId,
    /// The 0-based page index.
    pub index: usize,
}

impl LopdfPage {
    /// The 1-based page number lopdf uses as its page key.
    pub fn page_number(&self) -> u32 {
        self.index as u32 + 1
    }
}

/// The lopdf-based PDF backend.
///
/// # Example
///
/// ```ignore
/// use pdfharvest_parse::{LopdfBackend, PdfBackend};
///
/// let doc = LopdfBackend::open(pdf_bytes)?;
/// let page = LopdfBackend::get_page(&doc, 0)?;
/// let text = LopdfBackend::page_text(&doc, &page)?;
/// ```
pub struct LopdfBackend;

impl PdfBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Page = LopdfPage;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        // Reject encrypted PDFs when no password is provided
        if inner.is_encrypted() {
            return Err(BackendError::Core(
                pdfharvest_core::PdfError::PasswordRequired,
            ));
        }

        Ok(LopdfDocument::from_inner(inner))
    }

    fn open_with_password(bytes: &[u8], password: &str) -> Result<Self::Document, Self::Error> {
        let mut inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        // Decrypt if encrypted; ignore password if not encrypted
        if inner.is_encrypted() {
            inner.decrypt(password).map_err(|e| {
                let msg = e.to_string();
                if msg.contains("incorrect") || msg.contains("password") {
                    BackendError::Core(pdfharvest_core::PdfError::InvalidPassword)
                } else {
                    BackendError::Parse(format!("decryption failed: {e}"))
                }
            })?;
        }

        Ok(LopdfDocument::from_inner(inner))
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error> {
        if index >= doc.page_ids.len() {
            return Err(BackendError::Parse(format!(
                "page index {index} out of range (0..{})",
                doc.page_ids.len()
            )));
        }
        Ok(LopdfPage {
            object_id: doc.page_ids[index],
            index,
        })
    }

    fn page_text(doc: &Self::Document, page: &Self::Page) -> Result<String, Self::Error> {
        doc.inner
            .extract_text(&[page.page_number()])
            .map_err(|e| {
                BackendError::Parse(format!(
                    "failed to extract text from page {}: {e}",
                    page.page_number()
                ))
            })
    }

    fn page_images(
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<ExtractResult<Vec<ImageResource>>, Self::Error> {
        let inner = &doc.inner;
        let resources = get_page_resources(inner, page.object_id)?;

        let Ok(xobjects) = resources.get(b"XObject") else {
            return Ok(ExtractResult::ok(Vec::new()));
        };
        let xobjects = resolve_ref(inner, xobjects).as_dict().map_err(|_| {
            BackendError::Parse("/XObject resource is not a dictionary".to_string())
        })?;

        let mut images = Vec::new();
        let mut warnings = Vec::new();
        for (name, entry) in xobjects.iter() {
            let name = String::from_utf8_lossy(name).into_owned();
            let stream = match resolve_ref(inner, entry).as_stream() {
                Ok(stream) => stream,
                Err(_) => {
                    tracing::warn!(page = page.page_number(), xobject = %name, "unreadable XObject");
                    warnings.push(ExtractWarning::with_code(
                        ExtractWarningCode::MalformedImage,
                        format!("XObject /{name} does not resolve to a stream"),
                    ));
                    continue;
                }
            };
            // Form XObjects and other non-image streams are not resources we extract
            if name_entry(inner, &stream.dict, b"Subtype").as_deref() != Some("Image") {
                continue;
            }
            images.push(image_resource(inner, name, stream));
        }

        Ok(ExtractResult::with_warnings(images, warnings))
    }

    fn document_metadata(doc: &Self::Document) -> Result<DocumentMetadata, Self::Error> {
        extract_document_metadata(&doc.inner)
    }
}

/// Build an [`ImageResource`] from an image XObject stream.
///
/// Lossless images carry their decoded samples, everything else carries
/// the stream content with any leading Flate layers removed.
fn image_resource(doc: &lopdf::Document, name: String, stream: &lopdf::Stream) -> ImageResource {
    let filters = stream_filters(doc, &stream.dict);
    let filter_name = filters.last().cloned().unwrap_or_default();

    let raw_bytes = match classify_filter(&filter_name) {
        // lopdf undoes /DecodeParms PNG predictors while decoding
        Some(FilterFamily::Lossless) => match stream.decompressed_content() {
            Ok(samples) => samples,
            Err(e) => {
                tracing::debug!(xobject = %name, filter = %filter_name, error = %e, "keeping undecoded image stream");
                stream.content.clone()
            }
        },
        _ if filters.len() > 1 => inflate_layers(&stream.content, &filters[..filters.len() - 1])
            .unwrap_or_else(|| stream.content.clone()),
        _ => stream.content.clone(),
    };

    ImageResource {
        name,
        filter_name,
        width: u32_entry(doc, &stream.dict, b"Width").unwrap_or(0),
        height: u32_entry(doc, &stream.dict, b"Height").unwrap_or(0),
        bits_per_component: u32_entry(doc, &stream.dict, b"BitsPerComponent"),
        color_space: name_entry(doc, &stream.dict, b"ColorSpace"),
        raw_bytes,
    }
}

/// Undo the Flate layers wrapping a lossy image.
///
/// Returns `None` unless every one of `filters` is a Flate layer.
fn inflate_layers(content: &[u8], filters: &[String]) -> Option<Vec<u8>> {
    if filters.is_empty() || !filters.iter().all(|f| f == "FlateDecode" || f == "Fl") {
        return None;
    }
    let mut data = content.to_vec();
    for _ in filters {
        let mut decoded = Vec::new();
        ZlibDecoder::new(data.as_slice())
            .read_to_end(&mut decoded)
            .ok()?;
        data = decoded;
    }
    Some(data)
}

/// The `/Filter` entry as a list of names in decoding order.
fn stream_filters(doc: &lopdf::Document, dict: &lopdf::Dictionary) -> Vec<String> {
    let Ok(filter) = dict.get(b"Filter") else {
        return Vec::new();
    };
    let filter = resolve_ref(doc, filter);
    // Filter can be a single name or an array of names
    if let Ok(name) = filter.as_name() {
        vec![String::from_utf8_lossy(name).into_owned()]
    } else if let Ok(arr) = filter.as_array() {
        arr.iter()
            .filter_map(|item| resolve_ref(doc, item).as_name().ok())
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect()
    } else {
        Vec::new()
    }
}

fn u32_entry(doc: &lopdf::Document, dict: &lopdf::Dictionary, key: &[u8]) -> Option<u32> {
    let value = resolve_ref(doc, dict.get(key).ok()?).as_i64().ok()?;
    u32::try_from(value).ok()
}

fn name_entry(doc: &lopdf::Document, dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    let name = resolve_ref(doc, dict.get(key).ok()?).as_name().ok()?;
    Some(String::from_utf8_lossy(name).into_owned())
}

fn resolve_ref<'a>(doc: &'a lopdf::Document, obj: &'a lopdf::Object) -> &'a lopdf::Object {
    match obj {
        lopdf::Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        other => other,
    }
}

/// Look up a key in the page dictionary, walking up the page tree
/// (via /Parent) if the key is not found on the page itself.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: lopdf::ObjectId,
    key: &[u8],
) -> Result<Option<&'a lopdf::Object>, BackendError> {
    let mut current_id = page_id;
    loop {
        let dict = doc
            .get_object(current_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(parent_obj) => {
                current_id = parent_obj
                    .as_reference()
                    .map_err(|e| BackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
}

/// Get the resources dictionary for a page, handling inheritance.
fn get_page_resources(
    doc: &lopdf::Document,
    page_id: lopdf::ObjectId,
) -> Result<&lopdf::Dictionary, BackendError> {
    match resolve_inherited(doc, page_id, b"Resources")? {
        Some(obj) => {
            let obj = match obj {
                lopdf::Object::Reference(id) => doc.get_object(*id).map_err(|e| {
                    BackendError::Parse(format!("failed to resolve /Resources reference: {e}"))
                })?,
                other => other,
            };
            obj.as_dict()
                .map_err(|_| BackendError::Parse("/Resources is not a dictionary".to_string()))
        }
        None => {
            static EMPTY_DICT: std::sync::LazyLock<lopdf::Dictionary> =
                std::sync::LazyLock::new(lopdf::Dictionary::new);
            Ok(&EMPTY_DICT)
        }
    }
}

/// Extract a string value from a lopdf dictionary, handling both String and Name types.
fn extract_string_from_dict(
    doc: &lopdf::Document,
    dict: &lopdf::Dictionary,
    key: &[u8],
) -> Option<String> {
    match resolve_ref(doc, dict.get(key).ok()?) {
        lopdf::Object::String(bytes, _) => {
            // UTF-16 BE with BOM, otherwise UTF-8 with a Latin-1 fallback
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let units: Vec<u16> = bytes[2..]
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                String::from_utf16(&units).ok()
            } else {
                match std::str::from_utf8(bytes) {
                    Ok(s) => Some(s.to_string()),
                    Err(_) => Some(bytes.iter().map(|&b| b as char).collect()),
                }
            }
        }
        lopdf::Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Extract document-level metadata from the PDF /Info dictionary.
fn extract_document_metadata(doc: &lopdf::Document) -> Result<DocumentMetadata, BackendError> {
    let Ok(info_ref) = doc.trailer.get(b"Info") else {
        return Ok(DocumentMetadata::default());
    };
    let Ok(info_dict) = resolve_ref(doc, info_ref).as_dict() else {
        return Ok(DocumentMetadata::default());
    };

    Ok(DocumentMetadata {
        title: extract_string_from_dict(doc, info_dict, b"Title"),
        author: extract_string_from_dict(doc, info_dict, b"Author"),
        subject: extract_string_from_dict(doc, info_dict, b"Subject"),
        keywords: extract_string_from_dict(doc, info_dict, b"Keywords"),
        creator: extract_string_from_dict(doc, info_dict, b"Creator"),
        producer: extract_string_from_dict(doc, info_dict, b"Producer"),
        creation_date: extract_string_from_dict(doc, info_dict, b"CreationDate"),
        mod_date: extract_string_from_dict(doc, info_dict, b"ModDate"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
    use pdfharvest_core::PdfError;
    use std::io::Write;

    /// One test page: a content stream plus named XObjects.
    struct TestPage {
        content: String,
        xobjects: Vec<(&'static str, Object)>,
    }

    impl TestPage {
        fn text(lines: &[&str]) -> Self {
            let content = lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    format!("BT /F1 12 Tf 72 {} Td ({line}) Tj ET\n", 720 - 20 * i)
                })
                .collect();
            Self {
                content,
                xobjects: Vec::new(),
            }
        }

        fn with_xobject(mut self, name: &'static str, obj: Object) -> Self {
            self.xobjects.push((name, obj));
            self
        }
    }

    fn build_pdf(pages: Vec<TestPage>, info: Option<Dictionary>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id: ObjectId = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let content_id = doc.add_object(Stream::new(dictionary! {}, page.content.into_bytes()));
            let mut xobjects = Dictionary::new();
            for (name, obj) in page.xobjects {
                let id = doc.add_object(obj);
                xobjects.set(name, id);
            }
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                    "XObject" => xobjects,
                },
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

        if let Some(info) = info {
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        let mut buf = Vec::new();
        doc.save_to(&mut buf).expect("failed to save test PDF");
        buf
    }

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn image_stream(filter: Option<Object>, width: i64, height: i64, content: Vec<u8>) -> Object {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width,
            "Height" => height,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8i64,
        };
        if let Some(filter) = filter {
            dict.set("Filter", filter);
        }
        Object::Stream(Stream::new(dict, content))
    }

    const RGB_2X2: [u8; 12] = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 0];
    const JPEG_BYTES: [u8; 6] = [0xFF, 0xD8, 0xFF, 0xE0, 0xFF, 0xD9];

    fn open_single(page: TestPage) -> (LopdfDocument, LopdfPage) {
        let doc = LopdfBackend::open(&build_pdf(vec![page], None)).unwrap();
        let page = LopdfBackend::get_page(&doc, 0).unwrap();
        (doc, page)
    }

    // --- open / pages ---

    #[test]
    fn open_counts_pages() {
        let pdf = build_pdf(
            vec![TestPage::text(&["a"]), TestPage::text(&["b"]), TestPage::text(&["c"])],
            None,
        );
        let doc = LopdfBackend::open(&pdf).unwrap();
        assert_eq!(LopdfBackend::page_count(&doc), 3);
    }

    #[test]
    fn open_invalid_bytes_returns_parse_error() {
        let err = LopdfBackend::open(b"not a pdf").unwrap_err();
        let pdf_err: PdfError = err.into();
        assert!(matches!(pdf_err, PdfError::ParseError(_)));
    }

    #[test]
    fn open_empty_bytes_returns_error() {
        assert!(LopdfBackend::open(&[]).is_err());
    }

    #[test]
    fn open_with_password_on_plain_pdf_ignores_password() {
        let pdf = build_pdf(vec![TestPage::text(&["x"])], None);
        let doc = LopdfBackend::open_with_password(&pdf, "secret").unwrap();
        assert_eq!(LopdfBackend::page_count(&doc), 1);
    }

    #[test]
    fn get_page_out_of_range() {
        let pdf = build_pdf(vec![TestPage::text(&["x"])], None);
        let doc = LopdfBackend::open(&pdf).unwrap();
        let err = LopdfBackend::get_page(&doc, 1).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn page_numbers_are_one_based() {
        let pdf = build_pdf(vec![TestPage::text(&["x"]), TestPage::text(&["y"])], None);
        let doc = LopdfBackend::open(&pdf).unwrap();
        assert_eq!(LopdfBackend::get_page(&doc, 1).unwrap().page_number(), 2);
    }

    // --- text ---

    #[test]
    fn page_text_one_line_per_text_object() {
        let (doc, page) = open_single(TestPage::text(&["Chapter 1: Intro", "Hello world"]));
        let text = LopdfBackend::page_text(&doc, &page).unwrap();
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["Chapter 1: Intro", "Hello world"]);
    }

    #[test]
    fn page_text_reads_the_requested_page_only() {
        let pdf = build_pdf(vec![TestPage::text(&["first"]), TestPage::text(&["second"])], None);
        let doc = LopdfBackend::open(&pdf).unwrap();
        let page = LopdfBackend::get_page(&doc, 1).unwrap();
        let text = LopdfBackend::page_text(&doc, &page).unwrap();
        assert!(text.contains("second"));
        assert!(!text.contains("first"));
    }

    // --- images ---

    #[test]
    fn flate_image_is_decoded_to_samples() {
        let (doc, page) = open_single(TestPage::text(&[]).with_xobject(
            "Im0",
            image_stream(Some("FlateDecode".into()), 2, 2, zlib(&RGB_2X2)),
        ));
        let result = LopdfBackend::page_images(&doc, &page).unwrap();
        assert!(result.is_clean());
        let images = result.value;
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].name, "Im0");
        assert_eq!(images[0].filter_name, "FlateDecode");
        assert_eq!((images[0].width, images[0].height), (2, 2));
        assert_eq!(images[0].bits_per_component, Some(8));
        assert_eq!(images[0].color_space.as_deref(), Some("DeviceRGB"));
        assert_eq!(images[0].raw_bytes, RGB_2X2);
    }

    #[test]
    fn flate_image_with_png_predictor_is_unfiltered() {
        // Two rows of 2 RGB pixels: row 1 uses PNG filter None, row 2 uses Sub
        let rows = [0, 255, 0, 0, 0, 255, 0, 1, 0, 0, 255, 255, 255, 1];
        let Object::Stream(mut stream) =
            image_stream(Some("FlateDecode".into()), 2, 2, zlib(&rows))
        else {
            unreachable!()
        };
        stream.dict.set(
            "DecodeParms",
            dictionary! { "Predictor" => 15i64, "Colors" => 3i64, "Columns" => 2i64 },
        );
        let (doc, page) =
            open_single(TestPage::text(&[]).with_xobject("Im0", Object::Stream(stream)));
        let result = LopdfBackend::page_images(&doc, &page).unwrap();
        assert!(result.is_clean());
        assert_eq!(result.value[0].raw_bytes, RGB_2X2);
    }

    #[test]
    fn undecodable_lossless_image_keeps_stream_content() {
        let (doc, page) = open_single(TestPage::text(&[]).with_xobject(
            "Im0",
            image_stream(Some("CCITTFaxDecode".into()), 2, 2, vec![7, 8, 9]),
        ));
        let images = LopdfBackend::page_images(&doc, &page).unwrap().value;
        assert_eq!(images[0].filter_name, "CCITTFaxDecode");
        assert_eq!(images[0].raw_bytes, vec![7, 8, 9]);
    }

    #[test]
    fn dct_image_is_passed_through() {
        let (doc, page) = open_single(TestPage::text(&[]).with_xobject(
            "Im0",
            image_stream(Some("DCTDecode".into()), 2, 2, JPEG_BYTES.to_vec()),
        ));
        let images = LopdfBackend::page_images(&doc, &page).unwrap().value;
        assert_eq!(images[0].filter_name, "DCTDecode");
        assert_eq!(images[0].raw_bytes, JPEG_BYTES);
    }

    #[test]
    fn flate_wrapped_dct_strips_flate_layer() {
        let chain = Object::Array(vec!["FlateDecode".into(), "DCTDecode".into()]);
        let (doc, page) = open_single(TestPage::text(&[]).with_xobject(
            "Im0",
            image_stream(Some(chain), 2, 2, zlib(&JPEG_BYTES)),
        ));
        let images = LopdfBackend::page_images(&doc, &page).unwrap().value;
        assert_eq!(images[0].filter_name, "DCTDecode");
        assert_eq!(images[0].raw_bytes, JPEG_BYTES);
    }

    #[test]
    fn unfiltered_image_has_empty_filter_name() {
        let (doc, page) = open_single(
            TestPage::text(&[]).with_xobject("Im0", image_stream(None, 2, 2, RGB_2X2.to_vec())),
        );
        let images = LopdfBackend::page_images(&doc, &page).unwrap().value;
        assert_eq!(images[0].filter_name, "");
        assert_eq!(images[0].raw_bytes, RGB_2X2);
    }

    #[test]
    fn images_keep_resource_order() {
        let (doc, page) = open_single(
            TestPage::text(&[])
                .with_xobject("ImB", image_stream(Some("DCTDecode".into()), 1, 1, JPEG_BYTES.to_vec()))
                .with_xobject("ImA", image_stream(Some("JPXDecode".into()), 1, 1, vec![1, 2, 3])),
        );
        let images = LopdfBackend::page_images(&doc, &page).unwrap().value;
        let names: Vec<&str> = images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["ImB", "ImA"]);
    }

    #[test]
    fn form_xobjects_are_skipped() {
        let form = Object::Stream(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "BBox" => vec![0.into(), 0.into(), 10.into(), 10.into()],
            },
            b"0 0 m 10 10 l S".to_vec(),
        ));
        let (doc, page) = open_single(TestPage::text(&[]).with_xobject("Fm0", form));
        let result = LopdfBackend::page_images(&doc, &page).unwrap();
        assert!(result.value.is_empty());
        assert!(result.is_clean());
    }

    #[test]
    fn non_stream_xobject_is_reported() {
        let (doc, page) = open_single(
            TestPage::text(&[]).with_xobject("Bad", Object::Dictionary(dictionary! {})),
        );
        let result = LopdfBackend::page_images(&doc, &page).unwrap();
        assert!(result.value.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, ExtractWarningCode::MalformedImage);
        assert!(result.warnings[0].description.contains("/Bad"));
    }

    #[test]
    fn page_without_xobjects_has_no_images() {
        let (doc, page) = open_single(TestPage::text(&["only text"]));
        let result = LopdfBackend::page_images(&doc, &page).unwrap();
        assert!(result.value.is_empty());
    }

    // --- helpers ---

    #[test]
    fn inflate_layers_requires_flate_only_chain() {
        let packed = zlib(b"abc");
        assert_eq!(
            inflate_layers(&packed, &["FlateDecode".to_string()]),
            Some(b"abc".to_vec())
        );
        assert_eq!(
            inflate_layers(&zlib(&packed), &["Fl".to_string(), "FlateDecode".to_string()]),
            Some(b"abc".to_vec())
        );
        assert_eq!(inflate_layers(&packed, &["LZWDecode".to_string()]), None);
        assert_eq!(inflate_layers(&packed, &[]), None);
        assert_eq!(inflate_layers(b"not zlib", &["FlateDecode".to_string()]), None);
    }

    // --- metadata ---

    #[test]
    fn document_metadata_from_info() {
        let info = dictionary! {
            "Title" => Object::string_literal("Handbook"),
            "Author" => Object::string_literal("Jane Doe"),
        };
        let pdf = build_pdf(vec![TestPage::text(&["x"])], Some(info));
        let doc = LopdfBackend::open(&pdf).unwrap();
        let meta = LopdfBackend::document_metadata(&doc).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Handbook"));
        assert_eq!(meta.author.as_deref(), Some("Jane Doe"));
        assert_eq!(meta.producer, None);
    }

    #[test]
    fn document_metadata_missing_info_is_empty() {
        let pdf = build_pdf(vec![TestPage::text(&["x"])], None);
        let doc = LopdfBackend::open(&pdf).unwrap();
        assert!(LopdfBackend::document_metadata(&doc).unwrap().is_empty());
    }
}
