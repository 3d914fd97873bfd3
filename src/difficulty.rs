//! Compact target encoding and difficulty
//!
//! Bitcoin packs a 256-bit target into four bytes: `bits = (exponent << 24) |
//! mantissa` with `target = mantissa * 256^(exponent - 3)`. Difficulty is the
//! ratio of the difficulty-1 target to the encoded target. Targets are kept
//! as exact 256-bit integers; floating point appears only in the final
//! quotient handed to callers.

use crate::constants::{MAX_COMPACT_EXPONENT, MIN_COMPACT_EXPONENT, PDIFF_ONE};
use crate::error::{BoostError, Result};
use primitive_types::U256;

/// Compact-encoded proof-of-work target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bits(u32);

impl Bits {
    pub fn new(bits: u32) -> Self {
        Bits(bits)
    }

    pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Bits(u32::from_le_bytes(bytes))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// The four-byte wire form used inside locking scripts and headers
    pub fn to_le_bytes(&self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    pub fn hex(&self) -> String {
        hex::encode(self.to_le_bytes())
    }

    /// Expand to the full 256-bit target.
    ///
    /// Rejects negative mantissas, zero targets, exponents outside 1..=33,
    /// and encodings whose value would not fit in 256 bits.
    pub fn target(&self) -> Result<U256> {
        let exponent = self.0 >> 24;
        let mantissa = self.0 & 0x00ff_ffff;
        if mantissa & 0x0080_0000 != 0 {
            return Err(BoostError::BadTarget);
        }
        if !(MIN_COMPACT_EXPONENT..=MAX_COMPACT_EXPONENT).contains(&exponent) {
            return Err(BoostError::BadTarget);
        }
        if mantissa == 0 {
            return Err(BoostError::BadTarget);
        }
        if mantissa > 0xffff && exponent > 32 {
            return Err(BoostError::BadTarget);
        }
        let target = if exponent <= 3 {
            U256::from(mantissa >> (8 * (3 - exponent)))
        } else {
            U256::from(mantissa) << (8 * (exponent - 3) as usize)
        };
        if target.is_zero() {
            return Err(BoostError::BadTarget);
        }
        Ok(target)
    }

    /// Compress a target, truncating below the mantissa
    pub fn from_target(target: &U256) -> Self {
        let mut size = (target.bits() + 7) / 8;
        let mut compact = if size <= 3 {
            target.low_u64() << (8 * (3 - size))
        } else {
            (*target >> (8 * (size - 3))).low_u64()
        };
        if compact & 0x0080_0000 != 0 {
            compact >>= 8;
            size += 1;
        }
        Bits(((size as u32) << 24) | compact as u32)
    }

    /// Compress a target, rounding to the nearest representable compact
    /// value instead of truncating
    fn from_target_rounded(target: &U256) -> Self {
        let mut size = (target.bits() + 7) / 8;
        let mut compact = if size <= 3 {
            target.low_u64() << (8 * (3 - size))
        } else {
            let shift = 8 * (size - 3);
            let truncated = (*target >> shift).low_u64();
            let round_up = (*target >> (shift - 1)).low_u64() & 1;
            truncated + round_up
        };
        if compact >= 0x0100_0000 {
            compact >>= 8;
            size += 1;
        }
        if compact & 0x0080_0000 != 0 {
            compact >>= 8;
            size += 1;
        }
        Bits(((size as u32) << 24) | compact as u32)
    }

    /// Difficulty relative to the difficulty-1 target
    pub fn difficulty(&self) -> Result<f64> {
        let target = self.target()?;
        Ok(u256_to_f64(&pdiff_one()) / u256_to_f64(&target))
    }

    /// Encode the compact target whose difficulty is closest to `diff`.
    ///
    /// Re-encoding a decoded difficulty reproduces the original four bytes.
    pub fn from_difficulty(diff: f64) -> Result<Self> {
        if !diff.is_finite() || diff <= 0.0 {
            return Err(BoostError::BadTarget);
        }
        let pdiff = pdiff_one();
        let target = if diff >= 1.0 {
            // target = pdiff / diff at scale 2^24, division rounded to nearest
            let scaled = f64_to_u256(diff * SCALE).ok_or(BoostError::BadTarget)?;
            if scaled.is_zero() {
                return Err(BoostError::BadTarget);
            }
            ((pdiff << 24) + scaled / 2) / scaled
        } else {
            // target = pdiff * (2^24 / diff) / 2^24; pdiff is 0xffff << 208
            let scaled = f64_to_u256(SCALE / diff).ok_or(BoostError::BadTarget)?;
            if scaled.bits() > 56 {
                return Err(BoostError::BadTarget);
            }
            (scaled * U256::from(0xffffu64)) << 184
        };
        let bits = Self::from_target_rounded(&target);
        bits.target()?;
        Ok(bits)
    }
}

const SCALE: f64 = 16_777_216.0; // 2^24

fn pdiff_one() -> U256 {
    U256::from_big_endian(&PDIFF_ONE)
}

/// Top 53 bits of a 256-bit integer as a float
fn u256_to_f64(value: &U256) -> f64 {
    let bits = value.bits();
    if bits <= 64 {
        value.low_u64() as f64
    } else {
        let shift = bits - 64;
        (*value >> shift).low_u64() as f64 * (shift as f64).exp2()
    }
}

/// Nearest 256-bit integer to a non-negative float, or None when it does
/// not fit
fn f64_to_u256(value: f64) -> Option<U256> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    if value < 1.0 {
        return Some(U256::zero());
    }
    let exponent = ((value.to_bits() >> 52) & 0x7ff) as i64 - 1023;
    if exponent >= 256 {
        return None;
    }
    if exponent <= 52 {
        return Some(U256::from(value.round() as u64));
    }
    let shift = (exponent - 52) as usize;
    let mantissa = (value / (shift as f64).exp2()).round() as u64;
    let base = U256::from(mantissa);
    if base.bits() + shift > 256 {
        return None;
    }
    Some(base << shift)
}
