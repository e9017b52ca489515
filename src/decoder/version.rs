/// Version information extraction for QR codes v7+
use crate::encoder::format::{version_bits, version_positions};
use crate::models::{BitMatrix, Version};

const MAX_VERSION_ERRORS: u32 = 3;

/// Version info is 18 bits (6 data + 12 ECC) for versions 7-40
pub struct VersionInfo;

impl VersionInfo {
    /// Read both version blocks; `None` below version 7 or when neither block is close to a valid word
    pub fn extract(matrix: &BitMatrix) -> Option<Version> {
        if matrix.width() < Version::new(7)?.size() {
            return None;
        }
        version_positions(matrix.width())
            .into_iter()
            .map(|copy| {
                copy.iter()
                    .enumerate()
                    .fold(0u32, |acc, (i, &(x, y))| acc | (u32::from(matrix.get(x, y)) << i))
            })
            .filter_map(Self::nearest)
            .min_by_key(|&(_, distance)| distance)
            .filter(|&(_, distance)| distance <= MAX_VERSION_ERRORS)
            .map(|(version, _)| version)
    }

    /// Closest valid version word to `bits`, with its Hamming distance
    fn nearest(bits: u32) -> Option<(Version, u32)> {
        Version::new(7)?
            .range_to(Version::MAX)
            .map(|version| (version, (version_bits(version) ^ bits).count_ones()))
            .min_by_key(|&(_, distance)| distance)
    }
}
