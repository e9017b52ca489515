/// Format information extraction from a module grid
use crate::encoder::format::{format_bits, format_positions};
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// Largest Hamming distance accepted when matching a format word
const MAX_FORMAT_ERRORS: u32 = 3;

/// Format info is 15 bits (5 data + 10 ECC), stored twice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub ec_level: ECLevel,
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Read both copies and pick the valid word closest to either
    pub fn extract(matrix: &BitMatrix) -> Option<Self> {
        let [first, second] = format_positions(matrix.width()).map(|copy| {
            copy.iter()
                .enumerate()
                .fold(0u16, |acc, (i, &(x, y))| acc | (u16::from(matrix.get(x, y)) << i))
        });

        let (best, distance) = [Self::nearest(first), Self::nearest(second)]
            .into_iter()
            .flatten()
            .min_by_key(|&(_, distance)| distance)?;
        (distance <= MAX_FORMAT_ERRORS).then_some(best)
    }

    /// Closest of the 32 valid format words to `bits`
    pub fn decode(bits: u16) -> Option<Self> {
        let (best, distance) = Self::nearest(bits)?;
        (distance <= MAX_FORMAT_ERRORS).then_some(best)
    }

    fn nearest(bits: u16) -> Option<(Self, u32)> {
        ECLevel::ALL
            .into_iter()
            .flat_map(|ec_level| {
                MaskPattern::ALL.into_iter().map(move |mask_pattern| Self {
                    ec_level,
                    mask_pattern,
                })
            })
            .map(|info| {
                let word = format_bits(info.ec_level, info.mask_pattern);
                (info, (word ^ bits).count_ones())
            })
            .min_by_key(|&(_, distance)| distance)
    }
}
