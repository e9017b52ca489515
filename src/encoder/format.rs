//! Format and version information: BCH codes and module positions
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_XOR_MASK: u16 = 0x5412;
const VERSION_GENERATOR: u32 = 0x1f25;

/// 15-bit format word: 2 level bits, 3 mask bits, 10 BCH bits, XOR-masked
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = u32::from(ec_level.format_bits() << 3 | mask.bits());
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    ((data << 10 | rem) as u16) ^ FORMAT_XOR_MASK
}

/// 18-bit version word: 6 version bits followed by 12 BCH bits
pub fn version_bits(version: Version) -> u32 {
    let data = u32::from(version.number());
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    data << 12 | rem
}

/// (x, y) of format bit `i` (0 = least significant) in both copies
///
/// The first copy wraps around the top-left finder, the second is split
/// between the top-right and bottom-left finders.
pub fn format_positions(size: usize) -> [[(usize, usize); 15]; 2] {
    let mut first = [(0, 0); 15];
    let mut second = [(0, 0); 15];
    for (i, pos) in first.iter_mut().enumerate() {
        *pos = match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        };
    }
    for (i, pos) in second.iter_mut().enumerate() {
        *pos = if i < 8 {
            (size - 1 - i, 8)
        } else {
            (8, size - 15 + i)
        };
    }
    [first, second]
}

/// (x, y) of version bit `i` in both 6x3 blocks
pub fn version_positions(size: usize) -> [[(usize, usize); 18]; 2] {
    let mut top_right = [(0, 0); 18];
    let mut bottom_left = [(0, 0); 18];
    for i in 0..18 {
        let a = size - 11 + i % 3;
        let b = i / 3;
        top_right[i] = (a, b);
        bottom_left[i] = (b, a);
    }
    [top_right, bottom_left]
}

/// Write both copies of the format word
pub fn draw_format_bits(matrix: &mut BitMatrix, bits: u16) {
    for copy in format_positions(matrix.width()) {
        for (i, (x, y)) in copy.into_iter().enumerate() {
            matrix.set(x, y, (bits >> i) & 1 != 0);
        }
    }
}

/// Write both version blocks; no-op below version 7
pub fn draw_version_bits(matrix: &mut BitMatrix, version: Version) {
    if version.number() < 7 {
        return;
    }
    let bits = version_bits(version);
    for copy in version_positions(matrix.width()) {
        for (i, (x, y)) in copy.into_iter().enumerate() {
            matrix.set(x, y, (bits >> i) & 1 != 0);
        }
    }
}
