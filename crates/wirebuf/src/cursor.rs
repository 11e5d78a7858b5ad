// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read cursor over an immutable payload buffer.
//!
//! All decoding is expressed as cursor reads. The cursor borrows the caller's
//! bytes, never mutates them, and only ever moves forward. Every read is
//! bounds-checked: a short buffer yields [`Error::UnexpectedEof`] (fixed-width
//! reads) or [`Error::Bounds`] (explicit counts) and leaves the position where
//! it was.

use std::sync::Arc;

use crate::config::{self, DecoderConfig};
use crate::decode::Decode;
use crate::error::{Error, Result};
use crate::registry::{HandlerRegistry, Resolved};
use crate::structural::{self, FrameStack};

/// Generate little-endian read methods for fixed-width primitives.
///
/// Each generated method:
/// 1. Checks that `$size` bytes remain (returns `Error::UnexpectedEof` otherwise)
/// 2. Copies them out and converts via `from_le_bytes()`
/// 3. Advances the position
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type> {
            Ok(<$type>::from_le_bytes(self.read_array::<$size>()?))
        }
    };
}

/// Forward-only reader over a byte window.
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
    registry: &'a HandlerRegistry,
    config: Arc<DecoderConfig>,
    pub(crate) frames: FrameStack,
}

impl<'a> Cursor<'a> {
    /// Cursor over the whole slice, bound to the global registry and config.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_registry(buffer, HandlerRegistry::global())
    }

    /// Cursor over `buffer[offset..offset + len]`.
    pub fn with_window(buffer: &'a [u8], offset: usize, len: usize) -> Result<Self> {
        let end = offset.checked_add(len).ok_or(Error::Bounds {
            requested: len,
            remaining: buffer.len().saturating_sub(offset),
        })?;
        if end > buffer.len() {
            return Err(Error::Bounds {
                requested: len,
                remaining: buffer.len().saturating_sub(offset),
            });
        }
        Ok(Self::new(&buffer[offset..end]))
    }

    /// Cursor bound to a specific handler registry.
    pub fn with_registry(buffer: &'a [u8], registry: &'a HandlerRegistry) -> Self {
        Self {
            buffer,
            offset: 0,
            registry,
            config: config::current(),
            frames: FrameStack::default(),
        }
    }

    /// Replace this cursor's configuration snapshot.
    #[must_use]
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn registry(&self) -> &'a HandlerRegistry {
        self.registry
    }

    /// Advance by `n` if `0 < n <= remaining`; otherwise do nothing.
    pub fn skip(&mut self, n: usize) {
        if n > 0 && n <= self.remaining() {
            self.offset += n;
        }
    }

    /// Jump to the end of the window.
    pub fn clear(&mut self) {
        self.offset = self.buffer.len();
    }

    /// Copy `count` bytes into `dst[dst_offset..]` and advance.
    ///
    /// Nothing is copied and the position is unchanged on failure.
    pub fn block_copy_out(&mut self, dst: &mut [u8], dst_offset: usize, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(Error::Bounds {
                requested: count,
                remaining: self.remaining(),
            });
        }
        let dst_room = dst.len().saturating_sub(dst_offset);
        if count > dst_room {
            return Err(Error::Bounds {
                requested: count,
                remaining: dst_room,
            });
        }
        dst[dst_offset..dst_offset + count]
            .copy_from_slice(&self.buffer[self.offset..self.offset + count]);
        self.offset += count;
        Ok(())
    }

    /// Consume and return every remaining byte.
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let rest = &self.buffer[self.offset..];
        self.offset = self.buffer.len();
        rest
    }

    /// Child cursor over the next `count` bytes; the parent skips past them.
    ///
    /// The child shares this cursor's registry and configuration, and
    /// continues this cursor's structural nesting depth.
    pub fn read_window(&mut self, count: usize) -> Result<Cursor<'a>> {
        if count > self.remaining() {
            return Err(Error::Bounds {
                requested: count,
                remaining: self.remaining(),
            });
        }
        let window = &self.buffer[self.offset..self.offset + count];
        self.offset += count;
        Ok(Cursor {
            buffer: window,
            offset: 0,
            registry: self.registry,
            config: Arc::clone(&self.config),
            frames: self.frames.nested(),
        })
    }

    /// Decode a value of type `T` through the handler resolution algorithm.
    pub fn read<T: Decode>(&mut self) -> Result<T> {
        match self.registry.resolve::<T>()? {
            Resolved::Procedure(decode) => decode(self),
            Resolved::Structural => structural::decode::<T>(self),
        }
    }

    /// Borrow the next `len` bytes and advance.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let slice = self.peek_bytes(len)?;
        self.offset += len;
        Ok(slice)
    }

    pub(crate) fn peek_bytes(&self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::UnexpectedEof {
                offset: self.offset,
                needed: len,
                remaining: self.remaining(),
            });
        }
        Ok(&self.buffer[self.offset..self.offset + len])
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.read_bytes(N)?);
        Ok(bytes)
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_i8, i8, 1);
    impl_read_le!(read_u16, u16, 2);
    impl_read_le!(read_i16, i16, 2);
    impl_read_le!(read_u32, u32, 4);
    impl_read_le!(read_i32, i32, 4);
    impl_read_le!(read_u64, u64, 8);
    impl_read_le!(read_i64, i64, 8);

    /// Byte `1` is true; every other value is false.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? == 1)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.offset)
            .field("len", &self.buffer.len())
            .finish_non_exhaustive()
    }
}
