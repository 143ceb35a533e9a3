//! Filter classification and pixel-grid reconstruction for embedded images.
//!
//! Image XObjects are routed by their `/Filter` name into one of two
//! disjoint families. Lossless streams decode to raw samples that are
//! reshaped into a `height × width × channels` grid; lossy streams already
//! hold a complete JPEG or JPEG 2000 file and are passed through untouched.

use std::fmt;

/// Filter names whose decoded output is the exact raster samples.
///
/// Includes the abbreviated names allowed in inline images.
pub const LOSSLESS_FILTERS: &[&str] = &[
    "LZWDecode",
    "LZW",
    "FlateDecode",
    "Fl",
    "ASCII85Decode",
    "A85",
    "ASCIIHexDecode",
    "AHx",
    "RunLengthDecode",
    "RL",
    "CCITTFaxDecode",
    "CCF",
    "JBIG2Decode",
];

/// Filter names whose stream content is a self-contained image file.
pub const LOSSY_FILTERS: &[&str] = &["DCTDecode", "DCT", "JPXDecode"];

/// The extraction path an image takes, decided by its filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FilterFamily {
    /// Reshape the decoded samples and encode as PNG.
    Lossless,
    /// Write the stream bytes as they are.
    Lossy,
}

impl FilterFamily {
    /// Lower-case name used in listings.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterFamily::Lossless => "lossless",
            FilterFamily::Lossy => "lossy",
        }
    }
}

/// Look up a filter name in the classification table.
///
/// Returns `None` for names in neither family; callers report those as
/// unknown filters.
pub fn classify_filter(filter_name: &str) -> Option<FilterFamily> {
    if LOSSLESS_FILTERS.iter().any(|f| *f == filter_name) {
        Some(FilterFamily::Lossless)
    } else if LOSSY_FILTERS.iter().any(|f| *f == filter_name) {
        Some(FilterFamily::Lossy)
    } else {
        None
    }
}

/// Container format of a saved image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ImageFormat {
    /// PNG encoded from a reshaped pixel grid.
    Png,
    /// JPEG passed through from a DCTDecode stream.
    Jpeg,
    /// JPEG 2000 passed through from a JPXDecode stream.
    Jp2,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Jp2 => "jp2",
        }
    }

    /// The format written for an image with the given filter, if any.
    pub fn for_filter(filter_name: &str) -> Option<Self> {
        match classify_filter(filter_name)? {
            FilterFamily::Lossless => Some(ImageFormat::Png),
            FilterFamily::Lossy if filter_name == "JPXDecode" => Some(ImageFormat::Jp2),
            FilterFamily::Lossy => Some(ImageFormat::Jpeg),
        }
    }
}

/// File name for the `index`-th saved image of page `page_number`.
///
/// Both numbers are used as given; callers apply their numbering base.
pub fn image_file_name(page_number: usize, index: usize, format: ImageFormat) -> String {
    format!("page_{page_number}_img_{index}.{}", format.extension())
}

/// Why a byte payload could not be reshaped into a pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReshapeError {
    /// Width or height is zero.
    EmptyDimensions {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
    /// The payload length is not a whole multiple of `width * height`.
    UnevenLength {
        /// Payload length in bytes.
        len: usize,
        /// `width * height`.
        pixels: usize,
    },
    /// The inferred bytes per pixel match no 8-bit or 16-bit layout.
    UnsupportedChannels(usize),
}

impl fmt::Display for ReshapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReshapeError::EmptyDimensions { width, height } => {
                write!(f, "image has empty dimensions {width}x{height}")
            }
            ReshapeError::UnevenLength { len, pixels } => write!(
                f,
                "{len} bytes cannot be split into {pixels} pixels of equal size"
            ),
            ReshapeError::UnsupportedChannels(n) => {
                write!(f, "unsupported channel count {n} (expected 1 to 4, 6 or 8)")
            }
        }
    }
}

impl std::error::Error for ReshapeError {}

/// A pixel buffer laid out row-major as `height × width × channels`.
///
/// 16-bit samples are kept big-endian, as stored in the PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Samples per pixel (1 gray, 2 gray+alpha, 3 RGB, 4 RGBA).
    pub channels: u8,
    /// Bits per sample, 8 or 16.
    pub bit_depth: u8,
    /// Interleaved samples, `width * height * channels * bit_depth / 8` bytes.
    pub data: Vec<u8>,
}

impl PixelGrid {
    /// Reinterpret `data` as a grid of the given dimensions, inferring the
    /// pixel layout from the payload length.
    ///
    /// Up to 4 bytes per pixel are 8-bit samples unless the image declares
    /// 16 bits per component. 6 and 8 bytes per pixel are always 16-bit RGB
    /// and RGBA.
    pub fn from_raw(
        data: Vec<u8>,
        width: u32,
        height: u32,
        bits_per_component: Option<u32>,
    ) -> Result<Self, ReshapeError> {
        let pixels = width as usize * height as usize;
        if pixels == 0 {
            return Err(ReshapeError::EmptyDimensions { width, height });
        }
        if data.is_empty() || data.len() % pixels != 0 {
            return Err(ReshapeError::UnevenLength {
                len: data.len(),
                pixels,
            });
        }
        let bytes_per_pixel = data.len() / pixels;
        let (channels, bit_depth) = match (bytes_per_pixel, bits_per_component) {
            (2 | 4, Some(16)) => (bytes_per_pixel / 2, 16),
            (1..=4, _) => (bytes_per_pixel, 8),
            (6 | 8, _) => (bytes_per_pixel / 2, 16),
            _ => return Err(ReshapeError::UnsupportedChannels(bytes_per_pixel)),
        };
        Ok(Self {
            width,
            height,
            channels: channels as u8,
            bit_depth,
            data,
        })
    }
}
