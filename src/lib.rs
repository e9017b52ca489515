//! rounded_qr - QR Model 2 encoder with rounded vector outlines
//!
//! Encodes a payload into a QR symbol (versions 1-40, levels L/M/Q/H) and turns
//! the dark modules into a continuous outline of move, line, arc and close
//! commands that any vector backend can draw.
//!
//! ```
//! use rounded_qr::{ECLevel, PathOptions, encode, synthesize_path};
//!
//! let grid = encode(b"HELLO WORLD", ECLevel::M).unwrap();
//! assert_eq!(grid.size(), 21);
//! let commands = synthesize_path(&grid, 256.0, 256.0, &PathOptions::default());
//! assert!(!commands.is_empty());
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Builder API (payload, level, size, radii)
pub mod builder;
/// Process-wide defaults read from the environment
pub mod config;
/// Grid reader (format/version info, Reed-Solomon correction, segment parsing)
pub mod decoder;
/// QR encoder (segments, error correction, symbol assembly)
pub mod encoder;
/// Encoding errors
pub mod error;
/// Core data structures (ModuleGrid, BitMatrix, Version, Point, etc.)
pub mod models;
/// Rounded outline synthesis and command sinks
pub mod path;
/// GF(256) arithmetic and bit buffers
pub mod utils;

pub use builder::{Builder, RoundedQr};
pub use decoder::{DecodeError, DecodedSymbol, read_grid};
pub use encoder::mask::penalty_score;
pub use encoder::tables::max_payload_len;
pub use encoder::{EncodeOptions, encode, encode_batch, encode_with};
pub use error::{QrError, Result};
pub use models::{
    BitMatrix, ECLevel, MaskPattern, Mode, Module, ModuleGrid, Point, QUIET_ZONE, Size, Version,
};
pub use path::sink::{PathSink, SvgPathData, replay};
pub use path::{Arc, PathCommand, PathOptions, synthesize_matrix_path, synthesize_path};
