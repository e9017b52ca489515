//! QR Model 2 encoder
//!
//! Payload bytes go through the pipeline:
//! - Segment: mode selection and data codewords
//! - Reed-Solomon: per-block ECC and interleaving
//! - Symbol: function patterns, zigzag placement, mask search

pub mod format;
pub mod function_mask;
pub mod mask;
pub mod placement;
pub mod reed_solomon;
pub mod segment;
pub mod symbol;
pub mod tables;

use log::debug;
use rayon::prelude::*;

use crate::error::{QrError, Result};
use crate::models::{ECLevel, MaskPattern, ModuleGrid, Version};
use reed_solomon::add_ecc_and_interleave;
use segment::Segment;
use tables::data_capacity_bits;

/// Call-time encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Requested error correction level
    pub level: ECLevel,
    /// Smallest version to consider
    pub min_version: Version,
    /// Largest version to consider
    pub max_version: Version,
    /// Use this mask instead of searching all eight
    pub mask: Option<MaskPattern>,
    /// Raise the level while the data still fits the chosen version
    pub boost_level: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::new(ECLevel::M)
    }
}

impl EncodeOptions {
    /// Options for `level` with every version allowed
    pub fn new(level: ECLevel) -> Self {
        Self {
            level,
            min_version: Version::MIN,
            max_version: Version::MAX,
            mask: None,
            boost_level: false,
        }
    }

    /// Copy with another error correction level
    pub fn with_level(self, level: ECLevel) -> Self {
        Self { level, ..self }
    }

    /// Copy restricted to versions `min..=max`
    pub fn with_version_range(self, min: Version, max: Version) -> Self {
        Self {
            min_version: min,
            max_version: max,
            ..self
        }
    }

    /// Copy with a fixed mask pattern
    pub fn with_mask(self, mask: MaskPattern) -> Self {
        Self {
            mask: Some(mask),
            ..self
        }
    }

    /// Copy with level boosting switched on or off
    pub fn with_boost_level(self, boost_level: bool) -> Self {
        Self {
            boost_level,
            ..self
        }
    }
}

/// Encode `payload` at `level` into the smallest symbol that holds it
pub fn encode(payload: &[u8], level: ECLevel) -> Result<ModuleGrid> {
    encode_with(payload, &EncodeOptions::new(level))
}

/// Encode `payload` with explicit options
pub fn encode_with(payload: &[u8], options: &EncodeOptions) -> Result<ModuleGrid> {
    if options.min_version > options.max_version {
        return Err(QrError::InvalidVersionRange {
            min: options.min_version,
            max: options.max_version,
        });
    }

    let segment = Segment::from_bytes(payload);
    let version = select_version(
        &segment,
        options.level,
        options.min_version,
        options.max_version,
    )?;
    let level = if options.boost_level {
        boost_level(&segment, version, options.level)
    } else {
        options.level
    };

    let data = segment.to_codewords(version, level);
    let codewords = add_ecc_and_interleave(&data, version, level)?;
    let grid = symbol::assemble(version, level, &codewords, options.mask);
    debug!(
        "encoded {} bytes as {:?}: version {}, level {}, mask {}",
        payload.len(),
        segment.mode(),
        version,
        level,
        grid.mask_pattern().bits()
    );
    Ok(grid)
}

/// Encode independent payloads in parallel; results keep input order
pub fn encode_batch<P>(payloads: &[P], options: &EncodeOptions) -> Vec<Result<ModuleGrid>>
where
    P: AsRef<[u8]> + Sync,
{
    payloads
        .par_iter()
        .map(|payload| encode_with(payload.as_ref(), options))
        .collect()
}

/// Smallest version in `min..=max` whose data capacity holds the segment
pub fn select_version(
    segment: &Segment,
    level: ECLevel,
    min: Version,
    max: Version,
) -> Result<Version> {
    for version in min.range_to(max) {
        if let Some(bits) = segment.total_bits(version) {
            if bits <= data_capacity_bits(version, level) {
                return Ok(version);
            }
        }
    }
    Err(QrError::CapacityExceeded {
        needed_bits: segment.bit_len(max),
        capacity_bits: data_capacity_bits(max, level),
        level,
        max_version: max,
    })
}

/// Highest level not below `level` at which the segment still fits `version`
fn boost_level(segment: &Segment, version: Version, level: ECLevel) -> ECLevel {
    let bits = segment.bit_len(version);
    ECLevel::ALL
        .into_iter()
        .filter(|&candidate| candidate >= level)
        .take_while(|&candidate| bits <= data_capacity_bits(version, candidate))
        .last()
        .unwrap_or(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smallest_version_selected() {
        let grid = encode(b"HELLO WORLD", ECLevel::M).unwrap();
        assert_eq!(grid.version(), Version::MIN);
        assert_eq!(grid.size(), 21);

        // 1-M holds 14 bytes, 15 needs version 2
        assert_eq!(encode(&[b'a'; 14], ECLevel::M).unwrap().version(), Version::MIN);
        assert_eq!(
            encode(&[b'a'; 15], ECLevel::M).unwrap().version(),
            Version::new(2).unwrap()
        );
    }

    #[test]
    fn test_empty_payload() {
        let grid = encode(b"", ECLevel::H).unwrap();
        assert_eq!(grid.version(), Version::MIN);
        assert_eq!(grid.ec_level(), ECLevel::H);
    }

    #[test]
    fn test_capacity_exceeded() {
        let payload = vec![0x5a; 1274];
        let err = encode(&payload, ECLevel::H).unwrap_err();
        assert_eq!(
            err,
            QrError::CapacityExceeded {
                needed_bits: 4 + 16 + 1274 * 8,
                capacity_bits: 1276 * 8,
                level: ECLevel::H,
                max_version: Version::MAX,
            }
        );
        assert_eq!(encode(&payload[..1273], ECLevel::H).unwrap().version(), Version::MAX);
    }

    #[test]
    fn test_version_range() {
        let v5 = Version::new(5).unwrap();
        let options = EncodeOptions::new(ECLevel::L).with_version_range(v5, Version::MAX);
        assert_eq!(encode_with(b"1", &options).unwrap().version(), v5);

        let options = EncodeOptions::new(ECLevel::L).with_version_range(v5, Version::MIN);
        assert!(matches!(
            encode_with(b"1", &options),
            Err(QrError::InvalidVersionRange { .. })
        ));

        let options = EncodeOptions::new(ECLevel::L).with_version_range(Version::MIN, Version::MIN);
        assert!(matches!(
            encode_with(&[0u8; 18], &options),
            Err(QrError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_boost_level() {
        // 4 digits fit version 1 at every level
        let options = EncodeOptions::new(ECLevel::L).with_boost_level(true);
        assert_eq!(encode_with(b"1234", &options).unwrap().ec_level(), ECLevel::H);
        assert_eq!(encode(b"1234", ECLevel::L).unwrap().ec_level(), ECLevel::L);
    }

    #[test]
    fn test_forced_mask() {
        let options = EncodeOptions::default().with_mask(MaskPattern::Pattern2);
        let grid = encode_with(b"mask", &options).unwrap();
        assert_eq!(grid.mask_pattern(), MaskPattern::Pattern2);
        assert_eq!(grid.ec_level(), ECLevel::M);
    }

    #[test]
    fn test_batch_keeps_order() {
        let payloads = ["1", "HELLO", "hello", ""];
        let results = encode_batch(&payloads, &EncodeOptions::default());
        assert_eq!(results.len(), 4);
        for (payload, result) in payloads.iter().zip(&results) {
            let expected = encode(payload.as_bytes(), ECLevel::M).unwrap();
            assert_eq!(result.as_ref().unwrap(), &expected);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = encode(b"https://example.com/path?q=1", ECLevel::Q).unwrap();
        let b = encode(b"https://example.com/path?q=1", ECLevel::Q).unwrap();
        assert_eq!(a, b);
    }
}
