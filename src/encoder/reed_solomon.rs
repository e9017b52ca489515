//! Reed-Solomon ECC generation and block interleaving
use super::tables::{ec_block_info, total_codewords};
use crate::error::{QrError, Result};
use crate::models::{ECLevel, Version};
use crate::utils::gf256::Gf256;

/// Systematic Reed-Solomon encoder with generator roots alpha^0..alpha^(degree-1)
#[derive(Debug, Clone)]
pub struct ReedSolomonEncoder {
    /// Generator coefficients, highest power first, leading 1 omitted
    divisor: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Build the generator polynomial of the given degree (1..=255)
    pub fn new(degree: usize) -> Self {
        debug_assert!((1..=255).contains(&degree));
        let mut divisor = vec![0u8; degree];
        if let Some(last) = divisor.last_mut() {
            *last = 1;
        }

        // Multiply by (x - alpha^i) for each root
        let mut root = 1u8;
        for _ in 0..degree {
            for j in 0..degree {
                divisor[j] = Gf256::mul(divisor[j], root);
                if j + 1 < degree {
                    divisor[j] ^= divisor[j + 1];
                }
            }
            root = Gf256::mul(root, 0x02);
        }
        Self { divisor }
    }

    /// Number of ECC codewords produced per block
    pub fn degree(&self) -> usize {
        self.divisor.len()
    }

    /// Remainder of `data * x^degree` divided by the generator
    pub fn remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut result = vec![0u8; self.divisor.len()];
        if result.is_empty() {
            return result;
        }
        for &b in data {
            let factor = b ^ result[0];
            result.rotate_left(1);
            let last = result.len() - 1;
            result[last] = 0;
            for (r, &d) in result.iter_mut().zip(&self.divisor) {
                *r ^= Gf256::mul(d, factor);
            }
        }
        result
    }
}

/// Split data codewords into blocks, append ECC to each, then interleave.
///
/// `data` must hold exactly the data codewords of (version, level), otherwise
/// [`QrError::DataLength`] is returned. Short blocks come first; long blocks
/// carry one extra data codeword. The output lists the i-th data codeword of
/// every block in turn, then the i-th ECC codeword.
pub fn add_ecc_and_interleave(
    data: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<u8>> {
    let info = ec_block_info(version, ec_level);
    let total = total_codewords(version);
    let expected = total - info.num_blocks * info.ecc_per_block;
    if data.len() != expected {
        return Err(QrError::DataLength {
            expected,
            actual: data.len(),
            version,
            level: ec_level,
        });
    }
    let num_short = info.num_blocks - total % info.num_blocks;
    let short_data_len = total / info.num_blocks - info.ecc_per_block;

    let rs = ReedSolomonEncoder::new(info.ecc_per_block);
    let mut blocks: Vec<(&[u8], Vec<u8>)> = Vec::with_capacity(info.num_blocks);
    let mut rest = data;
    for i in 0..info.num_blocks {
        let len = short_data_len + usize::from(i >= num_short);
        let (block, tail) = rest.split_at(len);
        blocks.push((block, rs.remainder(block)));
        rest = tail;
    }

    let mut result = Vec::with_capacity(total);
    for i in 0..=short_data_len {
        for (block, _) in &blocks {
            if let Some(&b) = block.get(i) {
                result.push(b);
            }
        }
    }
    for i in 0..info.ecc_per_block {
        for (_, ecc) in &blocks {
            result.push(ecc[i]);
        }
    }
    Ok(result)
}
