use super::*;
use crate::encoder::{EncodeOptions, encode, encode_with};

// Known-good 21x21 QR matrix for "4376471154038" (Version 1-M, mask 7)
const GOLDEN: [&str; 21] = [
    "#######.....#.#######",
    "#.....#..#....#.....#",
    "#.###.#...##..#.###.#",
    "#.###.#...#...#.###.#",
    "#.###.#..####.#.###.#",
    "#.....#.#.#...#.....#",
    "#######.#.#.#.#######",
    ".........#...........",
    "#..#.##.######.#.....",
    "###.#..##..#.#.#.##..",
    "#..#.####.##..###...#",
    "..#.#..#....#####....",
    "..#...##.#.#.###.##..",
    "........#.#..####.##.",
    "#######...###.#.####.",
    "#.....#.#.....##....#",
    "#.###.#..##.###..#.##",
    "#.###.#.#.#..####..##",
    "#.###.#..###.###.#..#",
    "#.....#..####..##..#.",
    "#######.###..#.###...",
];

fn golden_matrix() -> BitMatrix {
    let mut matrix = BitMatrix::new(21, 21);
    for (y, row) in GOLDEN.iter().enumerate() {
        for (x, cell) in row.bytes().enumerate() {
            matrix.set(x, y, cell == b'#');
        }
    }
    matrix
}

#[test]
fn test_golden_matrix_decode() {
    let decoded = read_grid(&golden_matrix()).unwrap();
    assert_eq!(decoded.text(), "4376471154038");
    assert_eq!(decoded.version, Version::MIN);
    assert_eq!(decoded.ec_level, ECLevel::M);
    assert_eq!(decoded.mask_pattern, MaskPattern::Pattern7);
    assert_eq!(decoded.corrected_codewords, 0);
}

#[test]
fn test_encoder_reproduces_golden_matrix() {
    let options = EncodeOptions::new(ECLevel::M).with_mask(MaskPattern::Pattern7);
    let grid = encode_with(b"4376471154038", &options).unwrap();
    assert_eq!(grid.matrix(), &golden_matrix());
}

#[test]
fn test_read_corrects_damaged_modules() {
    let grid = encode(b"error correction at work", ECLevel::H).unwrap();
    let mut matrix = grid.matrix().clone();
    let size = grid.size();
    // Flip a few data modules in the bottom-right corner
    for (x, y) in [(size - 1, size - 1), (size - 2, size - 3), (size - 1, size - 5)] {
        assert!(!grid.is_function(x, y));
        matrix.toggle(x, y);
    }

    let decoded = read_grid(&matrix).unwrap();
    assert_eq!(decoded.data, b"error correction at work");
    assert!(decoded.corrected_codewords > 0);
}

#[test]
fn test_read_large_version() {
    let payload: Vec<u8> = (0..=255u8).cycle().take(600).collect();
    let grid = encode(&payload, ECLevel::Q).unwrap();
    assert!(grid.version().number() >= 7);

    let decoded = read_grid(grid.matrix()).unwrap();
    assert_eq!(decoded.version, grid.version());
    assert_eq!(decoded.data, payload);
}

#[test]
fn test_invalid_size() {
    assert_eq!(
        read_grid(&BitMatrix::new(22, 22)),
        Err(DecodeError::InvalidSize {
            width: 22,
            height: 22
        })
    );
    assert!(matches!(
        read_grid(&BitMatrix::new(21, 25)),
        Err(DecodeError::InvalidSize { .. })
    ));
}

#[test]
fn test_blank_matrix_has_no_format() {
    // All-light format areas are 5+ bits from every valid word
    assert_eq!(read_grid(&BitMatrix::square(21)), Err(DecodeError::FormatInfo));
}
