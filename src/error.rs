use thiserror::Error;

use crate::models::{ECLevel, Version};

/// Result alias for encoding operations
pub type Result<T> = std::result::Result<T, QrError>;

/// Errors produced while turning a payload into a symbol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// The payload does not fit the largest allowed version at the requested level
    #[error(
        "payload needs {needed_bits} data bits but version {max_version} at level {level} holds only {capacity_bits}"
    )]
    CapacityExceeded {
        /// Bits required by the encoded segment (header included)
        needed_bits: usize,
        /// Data bits available in `max_version`
        capacity_bits: usize,
        /// Requested error correction level
        level: ECLevel,
        /// Largest version that was tried
        max_version: Version,
    },
    /// `EncodeOptions` asked for a minimum version above the maximum
    #[error("minimum version {min} is above maximum version {max}")]
    InvalidVersionRange {
        /// Requested minimum
        min: Version,
        /// Requested maximum
        max: Version,
    },
    /// Data codewords handed to the ECC stage do not match the symbol's capacity
    #[error(
        "version {version} at level {level} takes {expected} data codewords, got {actual}"
    )]
    DataLength {
        /// Data codewords required by (version, level)
        expected: usize,
        /// Data codewords supplied
        actual: usize,
        /// Target version
        version: Version,
        /// Target error correction level
        level: ECLevel,
    },
}
