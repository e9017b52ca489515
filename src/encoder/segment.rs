//! Payload to data codewords
use super::tables::{data_bits, data_capacity_bits};
use crate::models::{ECLevel, Mode, Version};
use crate::utils::bits::BitBuffer;

/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
pub(crate) const ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// First pad codeword; the second is 0x11
const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Value of an alphanumeric character, `None` if it is outside the set
pub(crate) fn alphanumeric_value(byte: u8) -> Option<u32> {
    ALPHANUMERIC_CHARSET
        .iter()
        .position(|&c| c == byte)
        .map(|i| i as u32)
}

/// A whole payload encoded in a single mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    num_chars: usize,
    data: BitBuffer,
}

impl Segment {
    /// Pick the densest mode that covers every byte and encode the payload.
    ///
    /// An empty payload becomes a byte segment with no characters.
    pub fn from_bytes(payload: &[u8]) -> Self {
        if payload.is_empty() {
            return Self::bytes(payload);
        }
        Self::numeric(payload)
            .or_else(|| Self::alphanumeric(payload))
            .unwrap_or_else(|| Self::bytes(payload))
    }

    /// Digits packed three per 10 bits (7 and 4 bits for the tail).
    ///
    /// Returns `None` if any byte is not an ASCII digit.
    pub fn numeric(digits: &[u8]) -> Option<Self> {
        let value = |chunk: &[u8]| {
            chunk.iter().try_fold(0u32, |acc, &d| {
                d.is_ascii_digit().then(|| acc * 10 + u32::from(d - b'0'))
            })
        };
        let mut data = BitBuffer::with_capacity(data_bits(Mode::Numeric, digits.len()));
        let chunks = digits.chunks_exact(3);
        let tail = chunks.remainder();
        for chunk in chunks {
            data.append_bits(value(chunk)?, 10);
        }
        if !tail.is_empty() {
            data.append_bits(value(tail)?, (tail.len() * 3 + 1) as u8);
        }
        Some(Self {
            mode: Mode::Numeric,
            num_chars: digits.len(),
            data,
        })
    }

    /// Characters packed in pairs as `45 * first + second` over 11 bits.
    ///
    /// Returns `None` if any byte is outside the alphanumeric set.
    pub fn alphanumeric(text: &[u8]) -> Option<Self> {
        let mut data = BitBuffer::with_capacity(data_bits(Mode::Alphanumeric, text.len()));
        let pairs = text.chunks_exact(2);
        let tail = pairs.remainder();
        for pair in pairs {
            let first = alphanumeric_value(pair[0])?;
            let second = alphanumeric_value(pair[1])?;
            data.append_bits(first * 45 + second, 11);
        }
        if let [single] = tail {
            data.append_bits(alphanumeric_value(*single)?, 6);
        }
        Some(Self {
            mode: Mode::Alphanumeric,
            num_chars: text.len(),
            data,
        })
    }

    /// Raw 8-bit data
    pub fn bytes(bytes: &[u8]) -> Self {
        let mut data = BitBuffer::with_capacity(bytes.len() * 8);
        for &b in bytes {
            data.append_bits(u32::from(b), 8);
        }
        Self {
            mode: Mode::Byte,
            num_chars: bytes.len(),
            data,
        }
    }

    /// Mode chosen for the payload
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of characters (bytes for byte mode)
    pub fn num_chars(&self) -> usize {
        self.num_chars
    }

    /// Header plus data bits, whether or not the count fits the count field
    pub fn bit_len(&self, version: Version) -> usize {
        4 + self.mode.char_count_bits(version) as usize + self.data.len()
    }

    /// Header plus data bits, `None` if the character count overflows its field
    pub fn total_bits(&self, version: Version) -> Option<usize> {
        let count_bits = self.mode.char_count_bits(version);
        (self.num_chars < 1 << count_bits).then(|| self.bit_len(version))
    }

    /// Data codewords for the symbol: header, data, terminator, zero fill and pad codewords
    pub fn to_codewords(&self, version: Version, ec_level: ECLevel) -> Vec<u8> {
        let capacity_bits = data_capacity_bits(version, ec_level);
        let count_bits = self.mode.char_count_bits(version);

        let mut bits = BitBuffer::with_capacity(capacity_bits);
        bits.append_bits(u32::from(self.mode.indicator()), 4);
        bits.append_bits(self.num_chars as u32, count_bits);
        bits.extend_from(&self.data);
        debug_assert!(bits.len() <= capacity_bits);

        let terminator = capacity_bits.saturating_sub(bits.len()).min(4);
        bits.append_bits(0, terminator as u8);
        while bits.len() % 8 != 0 {
            bits.push(false);
        }

        let mut codewords = bits.into_bytes();
        for pad in PAD_CODEWORDS.iter().cycle() {
            if codewords.len() >= capacity_bits / 8 {
                break;
            }
            codewords.push(*pad);
        }
        codewords
    }
}
