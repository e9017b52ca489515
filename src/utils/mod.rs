//! Low-level helpers shared by the encoder and the reader
//!
//! - GF(256) arithmetic for Reed-Solomon (polynomial 0x11D)
//! - Bit buffers (MSB-first writer and reader)

pub mod bits;
pub mod gf256;
