//! Reader for clean module grids
//!
//! Reverses the encoder stages on an axis-aligned matrix:
//! - Format and version information (BCH nearest-codeword match)
//! - Unmasking and zigzag bitstream extraction
//! - De-interleaving and Reed-Solomon correction
//! - Segment parsing (numeric, alphanumeric, byte; ECI skipped)

/// Format information extraction (mask pattern, EC level)
pub mod format;
/// Segment parsing and block correction
mod payload;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Version information extraction (versions 7-40)
pub mod version;

#[cfg(test)]
mod tests;

use log::debug;
use thiserror::Error;

use crate::encoder::function_mask::FunctionMask;
use crate::encoder::mask::apply_mask;
use crate::encoder::placement::zigzag_positions;
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};
use format::FormatInfo;
use version::VersionInfo;

/// Why a grid could not be read back
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Side length is not 17 + 4v for a version 1-40, or the matrix is not square
    #[error("{width}x{height} is not a QR symbol size")]
    InvalidSize {
        /// Matrix width
        width: usize,
        /// Matrix height
        height: usize,
    },
    /// Neither format copy is within 3 bits of a valid word
    #[error("format information unreadable")]
    FormatInfo,
    /// Version blocks disagree with the symbol size
    #[error("version information does not match a {size}x{size} symbol")]
    VersionInfo {
        /// Symbol side length
        size: usize,
    },
    /// Fewer codewords than the ECC blocks require
    #[error("{0} codewords are too few for the block layout")]
    CodewordCount(usize),
    /// A block holds more errors than its ECC can repair
    #[error("block {block} has too many errors")]
    Uncorrectable {
        /// Index of the failing block
        block: usize,
    },
    /// Mode indicator this reader does not handle
    #[error("unsupported mode indicator {0:#06b}")]
    UnsupportedMode(u8),
    /// Numeric or alphanumeric value outside its character set
    #[error("invalid character value {0}")]
    InvalidCharacter(u32),
    /// Segment runs past the end of the data codewords
    #[error("segment data truncated")]
    Truncated,
}

/// Payload and metadata recovered from a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// Symbol version
    pub version: Version,
    /// Error correction level from the format information
    pub ec_level: ECLevel,
    /// Mask pattern from the format information
    pub mask_pattern: MaskPattern,
    /// Decoded payload bytes
    pub data: Vec<u8>,
    /// Codewords repaired by Reed-Solomon
    pub corrected_codewords: usize,
}

impl DecodedSymbol {
    /// Payload as text, invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

/// Decode an axis-aligned module matrix without quiet zone (true = dark)
pub fn read_grid(matrix: &BitMatrix) -> Result<DecodedSymbol, DecodeError> {
    let (width, height) = (matrix.width(), matrix.height());
    let version = Version::from_size(width)
        .filter(|_| width == height)
        .ok_or(DecodeError::InvalidSize { width, height })?;

    if version.number() >= 7 && VersionInfo::extract(matrix) != Some(version) {
        return Err(DecodeError::VersionInfo { size: width });
    }

    let format = FormatInfo::extract(matrix).ok_or(DecodeError::FormatInfo)?;

    let func = FunctionMask::new(version);
    let mut unmasked = matrix.clone();
    apply_mask(&mut unmasked, format.mask_pattern, &func);

    let bits = zigzag_positions(&func)
        .into_iter()
        .map(|(x, y)| unmasked.get(x, y));
    let codewords = payload::bits_to_codewords(bits);

    let (data_codewords, corrected) =
        payload::deinterleave_and_correct(&codewords, version, format.ec_level)?;
    let data = payload::decode_segments(&data_codewords, version)?;
    debug!(
        "read version {} level {} mask {}: {} bytes, {} corrected",
        version,
        format.ec_level,
        format.mask_pattern.bits(),
        data.len(),
        corrected
    );

    Ok(DecodedSymbol {
        version,
        ec_level: format.ec_level,
        mask_pattern: format.mask_pattern,
        data,
        corrected_codewords: corrected,
    })
}
