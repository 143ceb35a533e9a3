//! Shared helpers for CLI integration tests.
//!
//! Test PDFs are created programmatically using lopdf.

#![allow(dead_code)]

use std::io::Write;

use lopdf::{Dictionary, Object, Stream, dictionary};

pub const JPEG: [u8; 6] = [0xFF, 0xD8, 0xFF, 0xE0, 0xFF, 0xD9];
pub const RGB_2X2: [u8; 12] = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 0];

/// One page: text lines plus `(name, filter, width, height, content)` images.
pub struct PageSpec {
    pub lines: Vec<&'static str>,
    pub images: Vec<(&'static str, &'static str, i64, i64, Vec<u8>)>,
}

impl PageSpec {
    pub fn text(lines: &[&'static str]) -> Self {
        Self {
            lines: lines.to_vec(),
            images: Vec::new(),
        }
    }

    pub fn image(
        mut self,
        name: &'static str,
        filter: &'static str,
        width: i64,
        height: i64,
        content: Vec<u8>,
    ) -> Self {
        self.images.push((name, filter, width, height, content));
        self
    }
}

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn build_pdf(pages: Vec<PageSpec>) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for page in pages {
        let mut content = String::new();
        for (i, line) in page.lines.iter().enumerate() {
            content.push_str(&format!("BT /F1 12 Tf 72 {} Td ({line}) Tj ET\n", 720 - 20 * i));
        }
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let mut xobjects = Dictionary::new();
        for (name, filter, width, height, bytes) in page.images {
            let id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => width,
                    "Height" => height,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                    "Filter" => Object::Name(filter.as_bytes().to_vec()),
                },
                bytes,
            ));
            xobjects.set(name, Object::Reference(id));
        }

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
                "XObject" => xobjects,
            },
        });
        kids.push(Object::Reference(page_id));
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
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Write a PDF into a fresh temp file.
pub fn write_temp_pdf(pages: Vec<PageSpec>) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(&build_pdf(pages)).unwrap();
    file.flush().unwrap();
    file
}
