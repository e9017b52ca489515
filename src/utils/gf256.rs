/// GF(256) arithmetic used by Reed-Solomon coding
/// QR codes use the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 with generator alpha = 2
pub struct Gf256;

const PRIMITIVE: u16 = 0x11d;

struct Tables {
    exp: [u8; 256],
    log: [u8; 256],
}

const fn build_tables() -> Tables {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    exp[255] = exp[0];
    Tables { exp, log }
}

static TABLES: Tables = build_tables();

impl Gf256 {
    /// alpha^n
    pub fn exp(n: usize) -> u8 {
        TABLES.exp[n % 255]
    }

    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = TABLES.log[a as usize] as usize;
        let log_b = TABLES.log[b as usize] as usize;
        TABLES.exp[(log_a + log_b) % 255]
    }

    /// a / b; `b` must be non-zero (zero yields zero)
    pub fn div(a: u8, b: u8) -> u8 {
        debug_assert!(b != 0, "division by zero in GF(256)");
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = TABLES.log[a as usize] as usize;
        let log_b = TABLES.log[b as usize] as usize;
        TABLES.exp[(log_a + 255 - log_b) % 255]
    }

    pub fn pow(a: u8, n: usize) -> u8 {
        if a == 0 {
            return if n == 0 { 1 } else { 0 };
        }
        let log_a = TABLES.log[a as usize] as usize;
        TABLES.exp[(log_a * (n % 255)) % 255]
    }
}
