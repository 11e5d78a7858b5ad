// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! UTF-16 code unit.

use crate::cursor::Cursor;
use crate::decode::{Decode, HandlerSource};
use crate::error::Result;

/// A single UTF-16 code unit as sent on the wire.
///
/// Kept as the raw unit because a lone surrogate has no `char` equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct WChar(pub u16);

impl WChar {
    /// The character, or `None` for a surrogate half.
    pub fn to_char(self) -> Option<char> {
        char::from_u32(u32::from(self.0))
    }

    pub fn is_surrogate(self) -> bool {
        (0xD800..=0xDFFF).contains(&self.0)
    }
}

impl From<WChar> for u16 {
    fn from(value: WChar) -> Self {
        value.0
    }
}

impl Cursor<'_> {
    /// Little-endian UTF-16 code unit.
    pub fn read_wchar(&mut self) -> Result<WChar> {
        Ok(WChar(self.read_u16()?))
    }
}

impl Decode for WChar {
    const SOURCE: HandlerSource = HandlerSource::Builtin;
    const MIN_WIRE_SIZE: usize = 2;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_wchar()
    }
}
