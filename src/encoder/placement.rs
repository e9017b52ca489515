//! Function pattern drawing and zigzag codeword placement
use super::format::draw_version_bits;
use super::function_mask::{FunctionMask, alignment_centers};
use crate::models::{BitMatrix, Version};

/// Draw finders, separators, timing, alignment, version blocks and the dark module.
///
/// Format modules are left light; they depend on the mask and are drawn later.
pub fn draw_function_patterns(matrix: &mut BitMatrix, version: Version) {
    let size = version.size();

    for i in 0..size {
        matrix.set(6, i, i % 2 == 0);
        matrix.set(i, 6, i % 2 == 0);
    }

    draw_finder(matrix, 3, 3);
    draw_finder(matrix, size - 4, 3);
    draw_finder(matrix, 3, size - 4);

    for (cx, cy) in alignment_centers(version) {
        for dy in -2isize..=2 {
            for dx in -2isize..=2 {
                let dark = dx.abs().max(dy.abs()) != 1;
                matrix.set(offset(cx, dx), offset(cy, dy), dark);
            }
        }
    }

    draw_version_bits(matrix, version);
    matrix.set(8, size - 8, true);
}

/// 7x7 finder centered at (cx, cy) plus its light separator ring, clipped to the symbol
fn draw_finder(matrix: &mut BitMatrix, cx: usize, cy: usize) {
    let size = matrix.width() as isize;
    for dy in -4isize..=4 {
        for dx in -4isize..=4 {
            let x = cx as isize + dx;
            let y = cy as isize + dy;
            if (0..size).contains(&x) && (0..size).contains(&y) {
                let dist = dx.abs().max(dy.abs());
                matrix.set(x as usize, y as usize, dist != 2 && dist != 4);
            }
        }
    }
}

fn offset(center: usize, delta: isize) -> usize {
    center.wrapping_add_signed(delta)
}

/// Data module coordinates in placement order.
///
/// Column pairs run right to left starting at the bottom-right corner,
/// alternating upward and downward, with column 6 (vertical timing) skipped.
/// Within a pair the right column comes first.
pub fn zigzag_positions(func: &FunctionMask) -> Vec<(usize, usize)> {
    let size = func.size();
    let mut positions = Vec::with_capacity(func.data_modules_count());
    let mut upward = true;
    let mut right = size as isize - 1;

    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        for step in 0..size {
            let y = if upward { size - 1 - step } else { step };
            for x in [right as usize, right as usize - 1] {
                if !func.is_function(x, y) {
                    positions.push((x, y));
                }
            }
        }
        upward = !upward;
        right -= 2;
    }
    positions
}

/// Write codeword bits (MSB first) along the zigzag; remainder modules stay light
pub fn place_codewords(matrix: &mut BitMatrix, func: &FunctionMask, codewords: &[u8]) {
    let bits = codewords
        .iter()
        .flat_map(|&cw| (0..8).rev().map(move |i| (cw >> i) & 1 != 0));
    for ((x, y), bit) in zigzag_positions(func).into_iter().zip(bits) {
        matrix.set(x, y, bit);
    }
}
