// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! 128-bit scaled decimal.
//!
//! Wire layout: two little-endian u64 words copied straight into the in-memory
//! decimal layout of the sending platform:
//!
//! ```text
//! word 0 : flags (low 32) | hi32 (high 32)
//! word 1 : lo32  (low 32) | mid32 (high 32)
//!
//! flags  : bits 16..=23 scale (0..=28), bit 31 sign
//! value  : (hi32:mid32:lo32 as 96-bit integer) / 10^scale
//! ```
//!
//! Compatibility: only encoders that replicate this exact layout round-trip.

use crate::cursor::Cursor;
use crate::decode::{Decode, HandlerSource};
use crate::error::Result;

const SCALE_SHIFT: u32 = 16;
const SCALE_MASK: u32 = 0x00FF_0000;
const SIGN_MASK: u32 = 0x8000_0000;

/// Raw 128-bit decimal, kept bit-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
    flags: u32,
    hi: u32,
    lo: u32,
    mid: u32,
}

impl Decimal {
    /// Rebuild from the two wire words.
    pub const fn from_words(word0: u64, word1: u64) -> Self {
        Self {
            flags: word0 as u32,
            hi: (word0 >> 32) as u32,
            lo: word1 as u32,
            mid: (word1 >> 32) as u32,
        }
    }

    /// The two wire words.
    pub const fn to_words(self) -> (u64, u64) {
        (
            (self.flags as u64) | ((self.hi as u64) << 32),
            (self.lo as u64) | ((self.mid as u64) << 32),
        )
    }

    /// Build from a 96-bit mantissa, a scale and a sign.
    ///
    /// Bits of `mantissa` above 96 are discarded; `scale` is masked to 8 bits.
    pub const fn new(mantissa: u128, scale: u8, negative: bool) -> Self {
        let mut flags = (scale as u32) << SCALE_SHIFT;
        if negative {
            flags |= SIGN_MASK;
        }
        Self {
            flags,
            hi: (mantissa >> 64) as u32,
            lo: mantissa as u32,
            mid: (mantissa >> 32) as u32,
        }
    }

    pub const fn flags(self) -> u32 {
        self.flags
    }

    pub const fn scale(self) -> u8 {
        ((self.flags & SCALE_MASK) >> SCALE_SHIFT) as u8
    }

    pub const fn is_negative(self) -> bool {
        self.flags & SIGN_MASK != 0
    }

    /// Unsigned 96-bit integer part before scaling.
    pub const fn mantissa(self) -> u128 {
        ((self.hi as u128) << 64) | ((self.mid as u128) << 32) | (self.lo as u128)
    }

    /// Lossy conversion for display and arithmetic.
    pub fn to_f64(self) -> f64 {
        let magnitude = self.mantissa() as f64 / 10f64.powi(i32::from(self.scale()));
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl Cursor<'_> {
    /// 16-byte decimal (two little-endian u64 words).
    pub fn read_decimal(&mut self) -> Result<Decimal> {
        let word0 = self.read_u64()?;
        let word1 = self.read_u64()?;
        Ok(Decimal::from_words(word0, word1))
    }
}

impl Decode for Decimal {
    const SOURCE: HandlerSource = HandlerSource::Builtin;
    const MIN_WIRE_SIZE: usize = 16;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_decimal()
    }
}
