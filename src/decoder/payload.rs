use super::DecodeError;
use super::reed_solomon::ReedSolomonDecoder;
use crate::encoder::segment::ALPHANUMERIC_CHARSET;
use crate::encoder::tables::ec_block_info;
use crate::models::{ECLevel, Mode, Version};
use crate::utils::bits::BitReader;

/// Mode indicator of an ECI designator, skipped while reading
const ECI_INDICATOR: u32 = 0b0111;

/// Pack bits MSB first; a trailing partial byte (remainder bits) is dropped
pub(super) fn bits_to_codewords(bits: impl IntoIterator<Item = bool>) -> Vec<u8> {
    let mut codewords = Vec::new();
    let mut byte = 0u8;
    let mut filled = 0;
    for bit in bits {
        byte = (byte << 1) | u8::from(bit);
        filled += 1;
        if filled == 8 {
            codewords.push(byte);
            byte = 0;
            filled = 0;
        }
    }
    codewords
}

/// Undo interleaving, correct every block and return (data codewords, corrected count)
pub(super) fn deinterleave_and_correct(
    codewords: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Result<(Vec<u8>, usize), DecodeError> {
    let info = ec_block_info(version, ec_level);
    let total = codewords.len();
    let ecc_total = info.num_blocks * info.ecc_per_block;
    if total <= ecc_total {
        return Err(DecodeError::CodewordCount(total));
    }
    let data_total = total - ecc_total;

    let num_long_blocks = data_total % info.num_blocks;
    let num_short_blocks = info.num_blocks - num_long_blocks;
    let short_len = data_total / info.num_blocks;
    let block_len = |b: usize| short_len + usize::from(b >= num_short_blocks);

    let mut blocks: Vec<Vec<u8>> = (0..info.num_blocks)
        .map(|b| Vec::with_capacity(block_len(b) + info.ecc_per_block))
        .collect();

    let mut stream = codewords.iter().copied();
    for i in 0..=short_len {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < block_len(b) {
                block.extend(stream.next());
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.extend(stream.next());
        }
    }

    let rs = ReedSolomonDecoder::new(info.ecc_per_block);
    let mut data_out = Vec::with_capacity(data_total);
    let mut corrected = 0;
    for (b, block) in blocks.iter_mut().enumerate() {
        corrected += rs
            .decode(block)
            .ok_or(DecodeError::Uncorrectable { block: b })?;
        data_out.extend_from_slice(&block[..block_len(b)]);
    }

    Ok((data_out, corrected))
}

/// Parse segments until the terminator or the end of the data codewords
pub(super) fn decode_segments(data: &[u8], version: Version) -> Result<Vec<u8>, DecodeError> {
    let mut reader = BitReader::new(data);
    let mut out = Vec::new();

    while reader.remaining() >= 4 {
        let indicator = read(&mut reader, 4)?;
        if indicator == 0 {
            break;
        }
        if indicator == ECI_INDICATOR {
            skip_eci(&mut reader)?;
            continue;
        }

        let mode = Mode::from_indicator(indicator as u8)
            .ok_or(DecodeError::UnsupportedMode(indicator as u8))?;
        let count = read(&mut reader, mode.char_count_bits(version) as usize)? as usize;
        match mode {
            Mode::Numeric => decode_numeric(&mut reader, count, &mut out)?,
            Mode::Alphanumeric => decode_alphanumeric(&mut reader, count, &mut out)?,
            Mode::Byte => {
                for _ in 0..count {
                    out.push(read(&mut reader, 8)? as u8);
                }
            }
        }
    }

    Ok(out)
}

fn read(reader: &mut BitReader<'_>, bits: usize) -> Result<u32, DecodeError> {
    reader.read_bits(bits).ok_or(DecodeError::Truncated)
}

/// Three digits per 10 bits, then 7 or 4 bits for the tail
fn decode_numeric(
    reader: &mut BitReader<'_>,
    count: usize,
    out: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    let mut remaining = count;
    while remaining > 0 {
        let digits = remaining.min(3);
        let value = read(reader, digits * 3 + 1)?;
        if value >= 10u32.pow(digits as u32) {
            return Err(DecodeError::InvalidCharacter(value));
        }
        let text = format!("{value:0width$}", width = digits);
        out.extend_from_slice(text.as_bytes());
        remaining -= digits;
    }
    Ok(())
}

/// Pairs = 11 bits, single = 6 bits
fn decode_alphanumeric(
    reader: &mut BitReader<'_>,
    count: usize,
    out: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    let charset_len = ALPHANUMERIC_CHARSET.len() as u32;
    let lookup = |value: u32| {
        ALPHANUMERIC_CHARSET
            .get(value as usize)
            .copied()
            .ok_or(DecodeError::InvalidCharacter(value))
    };

    let mut remaining = count;
    while remaining >= 2 {
        let value = read(reader, 11)?;
        if value >= charset_len * charset_len {
            return Err(DecodeError::InvalidCharacter(value));
        }
        out.push(lookup(value / charset_len)?);
        out.push(lookup(value % charset_len)?);
        remaining -= 2;
    }
    if remaining == 1 {
        out.push(lookup(read(reader, 6)?)?);
    }
    Ok(())
}

/// ECI designator: 1, 2 or 3 bytes announced by the leading bits
fn skip_eci(reader: &mut BitReader<'_>) -> Result<(), DecodeError> {
    let first = read(reader, 8)?;
    let extra_bytes = if first & 0x80 == 0 {
        0
    } else if first & 0x40 == 0 {
        1
    } else {
        2
    };
    for _ in 0..extra_bytes {
        read(reader, 8)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::reed_solomon::add_ecc_and_interleave;
    use crate::encoder::segment::Segment;
    use crate::encoder::tables::total_codewords;
    use crate::utils::bits::BitBuffer;

    #[test]
    fn test_decode_payload_byte_mode() {
        // Byte mode, version 1: "HI"
        let mut bits = BitBuffer::new();
        bits.append_bits(0b0100, 4);
        bits.append_bits(2, 8);
        bits.append_bits(u32::from(b'H'), 8);
        bits.append_bits(u32::from(b'I'), 8);
        bits.append_bits(0, 4);

        let data = decode_segments(bits.as_bytes(), Version::MIN).unwrap();
        assert_eq!(data, b"HI");
    }

    #[test]
    fn test_decode_segments_with_eci() {
        let mut bits = BitBuffer::new();
        bits.append_bits(ECI_INDICATOR, 4);
        bits.append_bits(26, 8);
        bits.append_bits(0b0001, 4);
        bits.append_bits(5, 10);
        bits.append_bits(123, 10);
        bits.append_bits(45, 7);
        bits.append_bits(0, 4);

        let data = decode_segments(bits.as_bytes(), Version::MIN).unwrap();
        assert_eq!(data, b"12345");
    }

    #[test]
    fn test_numeric_keeps_leading_zeros() {
        let segment = Segment::numeric(b"007").unwrap();
        let data = segment.to_codewords(Version::MIN, ECLevel::M);
        assert_eq!(decode_segments(&data, Version::MIN).unwrap(), b"007");
    }

    #[test]
    fn test_unsupported_mode() {
        // Kanji indicator
        let data = [0b1000_0000, 0, 0];
        assert_eq!(
            decode_segments(&data, Version::MIN),
            Err(DecodeError::UnsupportedMode(0b1000))
        );
    }

    #[test]
    fn test_deinterleave_corrects_errors() {
        let version = Version::new(5).unwrap();
        let segment = Segment::from_bytes(b"interleaved blocks survive damage");
        let data = segment.to_codewords(version, ECLevel::Q);
        let mut codewords = add_ecc_and_interleave(&data, version, ECLevel::Q).unwrap();
        assert_eq!(codewords.len(), total_codewords(version));

        // One error in each of the four blocks
        for i in 0..4 {
            codewords[i] ^= 0xFF;
        }
        let (recovered, corrected) =
            deinterleave_and_correct(&codewords, version, ECLevel::Q).unwrap();
        assert_eq!(recovered, data);
        assert_eq!(corrected, 4);
    }

    #[test]
    fn test_bits_to_codewords_drops_remainder() {
        let bits = [true, false, false, false, false, false, false, true, true];
        assert_eq!(bits_to_codewords(bits), vec![0x81]);
    }
}
