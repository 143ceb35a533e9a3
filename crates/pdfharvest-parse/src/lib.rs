//! pdfharvest-parse: PDF parsing backend.
//!
//! This crate reads the raw material the harvester works on: the page
//! count, the plain text of each page, the image XObjects in each page's
//! resource dictionary and the document /Info metadata. Access goes
//! through the [`PdfBackend`] trait; [`LopdfBackend`] is the implementation.
//! It depends on pdfharvest-core for shared data types.

pub mod backend;
pub mod error;
pub mod lopdf_backend;

pub use backend::PdfBackend;
pub use error::BackendError;
pub use lopdf_backend::{LopdfBackend, LopdfDocument, LopdfPage};
pub use pdfharvest_core;
