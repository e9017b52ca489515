//! Symbol assembly: function patterns, data placement, mask search
use log::trace;

use super::format::{draw_format_bits, format_bits};
use super::function_mask::FunctionMask;
use super::mask::{apply_mask, penalty_score};
use super::placement::{draw_function_patterns, place_codewords};
use crate::models::{BitMatrix, ECLevel, MaskPattern, ModuleGrid, Version};

struct MaskCandidate {
    mask: MaskPattern,
    penalty: u32,
    matrix: BitMatrix,
}

/// Lay out interleaved codewords and pick the mask.
///
/// With `forced_mask` the penalty search is skipped.
pub fn assemble(
    version: Version,
    ec_level: ECLevel,
    codewords: &[u8],
    forced_mask: Option<MaskPattern>,
) -> ModuleGrid {
    let func = FunctionMask::new(version);
    let mut unmasked = BitMatrix::square(version.size());
    draw_function_patterns(&mut unmasked, version);
    place_codewords(&mut unmasked, &func, codewords);

    let best = match forced_mask {
        Some(mask) => candidate(&unmasked, &func, ec_level, mask),
        None => {
            let mut best = candidate(&unmasked, &func, ec_level, MaskPattern::Pattern0);
            for &mask in &MaskPattern::ALL[1..] {
                let next = candidate(&unmasked, &func, ec_level, mask);
                // Strict comparison keeps the lowest index on ties
                if next.penalty < best.penalty {
                    best = next;
                }
            }
            best
        }
    };

    ModuleGrid::new(best.matrix, func.into_matrix(), version, ec_level, best.mask)
}

fn candidate(
    unmasked: &BitMatrix,
    func: &FunctionMask,
    ec_level: ECLevel,
    mask: MaskPattern,
) -> MaskCandidate {
    let mut matrix = unmasked.clone();
    apply_mask(&mut matrix, mask, func);
    draw_format_bits(&mut matrix, format_bits(ec_level, mask));
    let penalty = penalty_score(&matrix);
    trace!("mask {} penalty {}", mask.bits(), penalty);
    MaskCandidate {
        mask,
        penalty,
        matrix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_codewords(version: Version) -> Vec<u8> {
        let n = crate::encoder::tables::total_codewords(version);
        (0..n).map(|i| (i * 37 % 256) as u8).collect()
    }

    #[test]
    fn test_chosen_mask_has_minimum_penalty() {
        let version = Version::new(3).unwrap();
        let codewords = sample_codewords(version);
        let grid = assemble(version, ECLevel::Q, &codewords, None);
        let chosen = penalty_score(grid.matrix());
        for mask in MaskPattern::ALL {
            let forced = assemble(version, ECLevel::Q, &codewords, Some(mask));
            let penalty = penalty_score(forced.matrix());
            assert!(chosen <= penalty);
            if penalty == chosen {
                assert!(grid.mask_pattern() <= mask);
            }
        }
    }

    #[test]
    fn test_forced_mask_is_kept() {
        let version = Version::MIN;
        let grid = assemble(
            version,
            ECLevel::L,
            &sample_codewords(version),
            Some(MaskPattern::Pattern6),
        );
        assert_eq!(grid.mask_pattern(), MaskPattern::Pattern6);
        assert_eq!(grid.size(), 21);
        assert!(grid.is_function(0, 0));
        assert!(!grid.is_function(20, 20));
    }
}
