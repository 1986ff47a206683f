//! Error types for the unafp library.

use std::io;
use thiserror::Error;

/// Result type alias for unafp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while decoding an AFP print stream.
///
/// Every format error is fatal to the load in progress: a failed load
/// yields no usable model. The single tolerant path is permissive
/// unknown-field handling, selected through
/// [`ParseOptions`](crate::parser::ParseOptions).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file does not start with a structured-field record.
    #[error("Unknown file format: not a valid AFP print stream")]
    UnknownFormat,

    /// A record did not start with the 0x5A carriage control character.
    #[error("Bad control byte 0x{found:02x} at offset {offset} (expected 0x5a)")]
    BadControlByte {
        /// Byte offset of the offending record
        offset: usize,
        /// The byte found in place of the control character
        found: u8,
    },

    /// The stream ended in the middle of a record.
    #[error("Truncated record at offset {offset}")]
    TruncatedRecord {
        /// Byte offset of the incomplete record
        offset: usize,
    },

    /// A structured-field type code not present in the known-field table
    /// (strict mode only).
    #[error("Unknown structured field id 0x{0:06x}")]
    UnknownField(u32),

    /// A begin field was never closed by its matching end field.
    #[error("Unterminated group: 0x{begin:06x} without matching 0x{end:06x}")]
    UnterminatedGroup {
        /// Type code of the unmatched begin field
        begin: u32,
        /// Type code of the expected end field
        end: u32,
    },

    /// A presentation-text payload ended on a chained function.
    #[error("Presentation text ends on a chained function")]
    DanglingChain,

    /// The escape sequence introducing an unchained function was wrong.
    #[error("Bad escape sequence 0x{0:04x} (expected 0x2bd3)")]
    BadEscapeSequence(u16),

    /// A Set Text Orientation function carried an invalid axis pair.
    #[error("Bad text orientation ({inline}, {baseline}): exactly one axis must be nonzero")]
    BadOrientation {
        /// Value of the inline-axis field
        inline: u16,
        /// Value of the baseline-axis field
        baseline: u16,
    },

    /// A Set Text Color code was not present in the color table.
    #[error("Unknown color code 0x{0:04x}")]
    UnknownColorCode(u16),

    /// A Set Extended Text Color function used an unsupported color space
    /// or a nonzero reserved byte.
    #[error("Unsupported color space 0x{0:02x} (only RGB is supported)")]
    UnsupportedColorSpace(u8),

    /// An overlay inclusion referenced a resource that is missing or is
    /// not a text overlay.
    #[error("Bad overlay reference: {0:?}")]
    BadOverlayReference(String),

    /// Invalid search pattern.
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}
