/// Reed-Solomon error correction for QR codes
/// Codeword `c[0]` is the coefficient of x^(n-1); generator roots are alpha^0 .. alpha^(ecc-1)
use crate::utils::gf256::Gf256;

/// Reed-Solomon decoder for QR codes
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` in place and return the number of repaired codewords.
    ///
    /// `None` when the block holds more errors than the ECC can repair.
    pub fn decode(&self, received: &mut [u8]) -> Option<usize> {
        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Some(0);
        }

        // Error locator via Berlekamp-Massey
        let sigma = find_error_locator(&syndrome)?;
        let num_errors = sigma.len() - 1;
        if 2 * num_errors > self.num_ecc_codewords {
            return None;
        }

        let n = received.len();
        let positions = find_error_positions(&sigma, n);
        if positions.len() != num_errors {
            return None;
        }

        // Forney: e_k = X_k * omega(X_k^-1) / sigma'(X_k^-1)
        let omega = error_evaluator(&sigma, &syndrome);
        for &pos in &positions {
            let power = (n - 1 - pos) % 255;
            let x_inv = Gf256::exp(255 - power);
            let sigma_prime = formal_derivative_at(&sigma, x_inv);
            if sigma_prime == 0 {
                return None;
            }
            let magnitude = Gf256::div(eval_poly(&omega, x_inv), sigma_prime);
            received[pos] ^= Gf256::mul(Gf256::exp(power), magnitude);
        }

        if self.calculate_syndrome(received).iter().any(|&s| s != 0) {
            return None;
        }
        Some(num_errors)
    }

    /// S_i = R(alpha^i)
    fn calculate_syndrome(&self, received: &[u8]) -> Vec<u8> {
        (0..self.num_ecc_codewords)
            .map(|i| {
                let x = Gf256::exp(i);
                received
                    .iter()
                    .fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
            })
            .collect()
    }
}

/// Berlekamp-Massey; coefficients in ascending order, sigma[0] = 1
fn find_error_locator(syndrome: &[u8]) -> Option<Vec<u8>> {
    let mut sigma = vec![1u8];
    let mut prev = vec![1u8];
    let mut prev_delta = 1u8;
    let mut degree = 0;
    let mut shift = 1;

    for k in 0..syndrome.len() {
        let mut delta = syndrome[k];
        for i in 1..=degree.min(sigma.len() - 1) {
            delta ^= Gf256::mul(sigma[i], syndrome[k - i]);
        }
        if delta == 0 {
            shift += 1;
            continue;
        }

        let coef = Gf256::div(delta, prev_delta);
        let saved = sigma.clone();
        if sigma.len() < prev.len() + shift {
            sigma.resize(prev.len() + shift, 0);
        }
        for (j, &b) in prev.iter().enumerate() {
            sigma[j + shift] ^= Gf256::mul(coef, b);
        }

        if 2 * degree <= k {
            degree = k + 1 - degree;
            prev = saved;
            prev_delta = delta;
            shift = 1;
        } else {
            shift += 1;
        }
    }

    while sigma.len() > 1 && sigma.last() == Some(&0) {
        sigma.pop();
    }
    (sigma.len() - 1 == degree).then_some(sigma)
}

/// Chien search: positions `p` where sigma(alpha^-(n-1-p)) = 0
fn find_error_positions(sigma: &[u8], n: usize) -> Vec<usize> {
    (0..n)
        .filter(|&pos| {
            let x_inv = Gf256::exp(255 - (n - 1 - pos) % 255);
            eval_poly(sigma, x_inv) == 0
        })
        .collect()
}

/// omega = S(x) * sigma(x) mod x^(2t)
fn error_evaluator(sigma: &[u8], syndrome: &[u8]) -> Vec<u8> {
    let mut omega = vec![0u8; syndrome.len()];
    for (i, slot) in omega.iter_mut().enumerate() {
        for j in 0..=i.min(sigma.len() - 1) {
            *slot ^= Gf256::mul(sigma[j], syndrome[i - j]);
        }
    }
    omega
}

/// sigma'(x) keeps only odd terms in characteristic 2
fn formal_derivative_at(sigma: &[u8], x: u8) -> u8 {
    sigma
        .iter()
        .enumerate()
        .skip(1)
        .step_by(2)
        .fold(0u8, |acc, (i, &c)| acc ^ Gf256::mul(c, Gf256::pow(x, i - 1)))
}

/// Horner evaluation of an ascending-order polynomial
fn eval_poly(coeffs: &[u8], x: u8) -> u8 {
    coeffs
        .iter()
        .rev()
        .fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
}
