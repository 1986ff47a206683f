//! # unafp
//!
//! AFP (Advanced Function Presentation) print-stream decoding for Rust.
//!
//! This library decodes AFP print archives into a queryable in-memory
//! model — documents, pages, positioned text and rule elements, and
//! embedded resources — for text extraction, search and layout
//! inspection without a rendering stack.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unafp::parse_file;
//!
//! fn main() -> unafp::Result<()> {
//!     let model = parse_file("archive.afp")?;
//!
//!     // Extract all text, pages separated by form feeds
//!     println!("{}", model.get_text());
//!
//!     // Find text anywhere in the stream
//!     for (page, element) in model.find_text("README", &unafp::FindOptions::new())? {
//!         println!("page {}: {:?}", page, element.position());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Text extraction**: positioned text elements with color and
//!   orientation, area and color filtering, regex search
//! - **Overlay resolution**: reusable text overlays merged into pages
//!   at their inclusion origin
//! - **Document grouping**: named page groups with their tag metadata
//! - **Resource export**: embedded raster images written to disk
//!
//! Decoding is strict by default: any malformed record fails the whole
//! load. Permissive mode keeps unknown structured fields and counts
//! them instead.

pub mod consts;
pub mod detect;
pub mod encoding;
pub mod error;
pub mod model;
pub mod parser;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_afp, AfpFormat};
pub use error::{Error, Result};
pub use model::{
    AfpModel, Area, Diagnostics, Document, Element, ElementKind, ElementQuery, FindOptions,
    ModelContent, Orientation, Page, Resource, RuleAxis, TextOptions,
};
pub use parser::{AfpParser, ErrorMode, ParseOptions, StructuredField};

use std::io::Read;
use std::path::Path;

/// Decode an AFP file into a model.
///
/// # Example
///
/// ```no_run
/// use unafp::parse_file;
///
/// let model = parse_file("archive.afp").unwrap();
/// println!("Pages: {}", model.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<AfpModel> {
    let parser = AfpParser::open(path)?;
    parser.parse()
}

/// Decode an AFP file with custom options.
///
/// # Example
///
/// ```no_run
/// use unafp::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().permissive();
/// let model = parse_file_with_options("archive.afp", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<AfpModel> {
    let parser = AfpParser::open_with_options(path, options)?;
    parser.parse()
}

/// Decode an AFP stream from bytes.
///
/// # Example
///
/// ```no_run
/// use unafp::parse_bytes;
///
/// let data = std::fs::read("archive.afp").unwrap();
/// let model = parse_bytes(&data).unwrap();
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<AfpModel> {
    let parser = AfpParser::from_bytes(data)?;
    parser.parse()
}

/// Decode an AFP stream from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<AfpModel> {
    let parser = AfpParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Decode an AFP stream from a reader.
///
/// # Example
///
/// ```no_run
/// use unafp::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("archive.afp").unwrap();
/// let model = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<AfpModel> {
    let parser = AfpParser::from_reader(reader)?;
    parser.parse()
}

/// Decode an AFP stream from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<AfpModel> {
    let parser = AfpParser::from_reader_with_options(reader, options)?;
    parser.parse()
}

/// Extract all text from an AFP file.
///
/// Pages are separated by form-feed characters.
///
/// # Example
///
/// ```no_run
/// use unafp::extract_text;
///
/// let text = extract_text("archive.afp").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let model = parse_file(path)?;
    Ok(model.get_text())
}
