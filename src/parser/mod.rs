//! AFP print-stream decoding.

mod afp_parser;
pub mod grouper;
mod options;
mod ptoca;
mod reader;
mod resources;
mod triplet;

pub use afp_parser::AfpParser;
pub use grouper::{fields_between, FieldGroup};
pub use options::{ErrorMode, ParseOptions};
pub use ptoca::PtocaDecoder;
pub use reader::{FieldReader, StructuredField};
pub use resources::resolve_resources;
pub use triplet::parse_triplets;
