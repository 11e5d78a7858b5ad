// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Length- and count-prefixed composite values.
//!
//! Wire layout (all little-endian):
//!
//! ```text
//! text      : u16 byte length | bytes (one char per byte)
//! sequence  : i32 count | element * count
//! map       : i32 count | (key | value) * count
//! ```
//!
//! Count prefixes are validated before anything is allocated: negative counts,
//! counts above `DecoderConfig::max_sequence_len`, and counts whose minimum
//! encoded size cannot fit in the remaining bytes are all rejected.

use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::config::TextMode;
use crate::cursor::Cursor;
use crate::decode::{Decode, HandlerSource};
use crate::error::{Error, Result};

impl Cursor<'_> {
    /// u16 length prefix followed by that many single-byte characters.
    pub fn read_string(&mut self) -> Result<String> {
        let len = usize::from(self.read_u16()?);
        self.read_fixed_string(len)
    }

    /// `len` single-byte characters, no prefix.
    pub fn read_fixed_string(&mut self, len: usize) -> Result<String> {
        let start = self.position();
        let bytes = self.peek_bytes(len)?;

        if self.config().text_mode == TextMode::StrictAscii {
            if let Some(i) = bytes.iter().position(|b| !b.is_ascii()) {
                return Err(Error::InvalidText {
                    offset: start + i,
                    byte: bytes[i],
                });
            }
        }

        let text = bytes.iter().copied().map(char::from).collect();
        self.skip(len);
        Ok(text)
    }

    /// i32 count prefix followed by `count` elements.
    pub fn read_sequence<T: Decode>(&mut self) -> Result<Vec<T>> {
        let count = self.read_count("sequence count", T::MIN_WIRE_SIZE)?;
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(self.read::<T>()?);
        }
        Ok(items)
    }

    /// i32 count prefix followed by `count` key/value pairs.
    ///
    /// Pairs are inserted in read order; a repeated key keeps the last value.
    pub fn read_map<K, V>(&mut self) -> Result<HashMap<K, V>>
    where
        K: Decode + Eq + Hash,
        V: Decode,
    {
        let pair_size = K::MIN_WIRE_SIZE.saturating_add(V::MIN_WIRE_SIZE);
        let count = self.read_count("map count", pair_size)?;
        let mut map = HashMap::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            let key = self.read::<K>()?;
            let value = self.read::<V>()?;
            map.insert(key, value);
        }
        Ok(map)
    }

    fn read_count(&mut self, context: &'static str, min_element_size: usize) -> Result<usize> {
        let raw = self.read_i32()?;
        let count = usize::try_from(raw).map_err(|_| Error::InvalidLength {
            context,
            value: i64::from(raw),
        })?;

        let limit = self.config().max_sequence_len;
        if count > limit {
            return Err(Error::LengthLimit {
                context,
                value: count,
                limit,
            });
        }

        let needed = count.saturating_mul(min_element_size);
        if needed > self.remaining() {
            return Err(Error::UnexpectedEof {
                offset: self.position(),
                needed,
                remaining: self.remaining(),
            });
        }

        Ok(count)
    }
}

impl Decode for String {
    const SOURCE: HandlerSource = HandlerSource::Builtin;
    const MIN_WIRE_SIZE: usize = 2;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_string()
    }
}

impl<T: Decode> Decode for Vec<T> {
    const SOURCE: HandlerSource = HandlerSource::Builtin;
    const MIN_WIRE_SIZE: usize = 4;

    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("List")
    }

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_sequence()
    }
}

impl<T: Decode> Decode for Box<[T]> {
    const SOURCE: HandlerSource = HandlerSource::Builtin;
    const MIN_WIRE_SIZE: usize = 4;

    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("Array")
    }

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(cursor.read_sequence::<T>()?.into_boxed_slice())
    }
}

impl<K, V> Decode for HashMap<K, V>
where
    K: Decode + Eq + Hash,
    V: Decode,
{
    const SOURCE: HandlerSource = HandlerSource::Builtin;
    const MIN_WIRE_SIZE: usize = 4;

    fn type_name() -> Cow<'static, str> {
        Cow::Borrowed("Dictionary")
    }

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_map()
    }
}

/// Boxing is transparent on the wire and to the self-reference guard.
///
/// `MIN_WIRE_SIZE` stays 0: forwarding `T::MIN_WIRE_SIZE` is a const-evaluation
/// cycle for mutually recursive types, so counts of boxed elements only get
/// the length-limit check before allocation.
impl<T: Decode> Decode for Box<T> {
    const SOURCE: HandlerSource = HandlerSource::Builtin;

    fn type_name() -> Cow<'static, str> {
        T::type_name()
    }

    fn identity() -> std::any::TypeId {
        T::identity()
    }

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Box::new(cursor.read::<T>()?))
    }
}
