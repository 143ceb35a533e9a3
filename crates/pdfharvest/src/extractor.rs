//! Per-page image extraction.
//!
//! Routes each [`ImageResource`] of a page by its filter: lossless images
//! are reshaped into a pixel grid and encoded as PNG, lossy images are
//! written as they are, anything else is reported and skipped.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use pdfharvest_core::{
    ExtractResult, ExtractWarning, ExtractWarningCode, FilterFamily, ImageFormat, ImageResource,
    IndexBase, PixelGrid, SavedImage, classify_filter, image_file_name,
};

use crate::sink::ImageSink;

/// Saves the images of one page at a time into an [`ImageSink`].
pub struct ImageExtractor<'a> {
    sink: &'a dyn ImageSink,
    index_base: IndexBase,
}

impl<'a> ImageExtractor<'a> {
    /// Create an extractor writing into `sink`, numbering images in `index_base`.
    pub fn new(sink: &'a dyn ImageSink, index_base: IndexBase) -> Self {
        Self { sink, index_base }
    }

    /// Extract and save the images of one page.
    ///
    /// `page_number` is used as given in file names and warnings. Images
    /// are numbered from the index base in the order they are saved; a
    /// skipped image does not consume a number.
    pub fn extract(
        &self,
        page_number: usize,
        images: &[ImageResource],
    ) -> ExtractResult<Vec<SavedImage>> {
        let mut saved = Vec::new();
        let mut warnings = Vec::new();

        for (position, resource) in images.iter().enumerate() {
            let resource_index = self.index_base.number(position);
            let index = self.index_base.number(saved.len());

            let (format, bytes) = match encode_resource(resource) {
                Ok(encoded) => encoded,
                Err((code, description)) => {
                    tracing::warn!(
                        page = page_number,
                        image = %resource.name,
                        filter = %resource.filter_name,
                        "{description}"
                    );
                    warnings.push(
                        ExtractWarning::with_code(code, description)
                            .on_page(page_number)
                            .for_image(resource_index),
                    );
                    continue;
                }
            };

            let file_name = image_file_name(page_number, index, format);
            match self.sink.write(&file_name, &bytes) {
                Ok(path) => saved.push(SavedImage {
                    path,
                    index,
                    format,
                }),
                Err(e) => {
                    tracing::warn!(page = page_number, file = %file_name, error = %e, "could not write image");
                    warnings.push(
                        ExtractWarning::with_code(
                            ExtractWarningCode::ImageWriteFailed,
                            format!("could not write {file_name}: {e}"),
                        )
                        .on_page(page_number)
                        .for_image(resource_index),
                    );
                }
            }
        }

        ExtractResult::with_warnings(saved, warnings)
    }
}

/// Produce the file format and bytes for one resource.
fn encode_resource(
    resource: &ImageResource,
) -> Result<(ImageFormat, Vec<u8>), (ExtractWarningCode, String)> {
    let unknown = || {
        (
            ExtractWarningCode::UnknownFilter,
            format!("Unknown PDF Filter: {:?}", resource.filter_name),
        )
    };
    let family = classify_filter(&resource.filter_name).ok_or_else(unknown)?;
    let format = ImageFormat::for_filter(&resource.filter_name).ok_or_else(unknown)?;

    match family {
        FilterFamily::Lossy => Ok((format, resource.raw_bytes.clone())),
        FilterFamily::Lossless => {
            let grid = PixelGrid::from_raw(
                resource.raw_bytes.clone(),
                resource.width,
                resource.height,
                resource.bits_per_component,
            )
            .map_err(|e| {
                (
                    ExtractWarningCode::MalformedImage,
                    format!("malformed image /{}: {e}", resource.name),
                )
            })?;
            let png = encode_png(&grid).map_err(|e| {
                (
                    ExtractWarningCode::MalformedImage,
                    format!("could not encode /{} as PNG: {e}", resource.name),
                )
            })?;
            Ok((format, png))
        }
    }
}

/// Encode a pixel grid as PNG, keeping its bit depth.
pub fn encode_png(grid: &PixelGrid) -> image::ImageResult<Vec<u8>> {
    let color = match (grid.channels, grid.bit_depth) {
        (1, 8) => ExtendedColorType::L8,
        (2, 8) => ExtendedColorType::La8,
        (3, 8) => ExtendedColorType::Rgb8,
        (_, 8) => ExtendedColorType::Rgba8,
        (1, _) => ExtendedColorType::L16,
        (2, _) => ExtendedColorType::La16,
        (3, _) => ExtendedColorType::Rgb16,
        _ => ExtendedColorType::Rgba16,
    };
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    if grid.bit_depth == 16 {
        // The encoder takes native-endian u16 samples
        let samples: Vec<u8> = grid
            .data
            .chunks_exact(2)
            .flat_map(|s| u16::from_be_bytes([s[0], s[1]]).to_ne_bytes())
            .collect();
        encoder.write_image(&samples, grid.width, grid.height, color)?;
    } else {
        encoder.write_image(&grid.data, grid.width, grid.height, color)?;
    }
    Ok(buf)
}
