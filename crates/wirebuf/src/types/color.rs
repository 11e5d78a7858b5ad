// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Float and byte colors.
//!
//! Both are sent as one byte per channel (`r g b [a]`). [`Color`] divides each
//! byte by the configured divisor; the default legacy divisor of 100 matches
//! existing encoders and yields channels in `[0, 2.55]`. See
//! [`ColorScale`](crate::config::ColorScale).

use crate::cursor::Cursor;
use crate::decode::{Decode, HandlerSource};
use crate::error::Result;

/// Alpha assigned when the wire carries no alpha byte.
pub const OPAQUE_ALPHA: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Cursor<'_> {
    fn read_channel(&mut self) -> Result<f32> {
        let divisor = self.config().color_scale.divisor();
        Ok(f32::from(self.read_u8()?) / divisor)
    }

    /// Four scaled channel bytes: r, g, b, a.
    pub fn read_color(&mut self) -> Result<Color> {
        Ok(Color {
            r: self.read_channel()?,
            g: self.read_channel()?,
            b: self.read_channel()?,
            a: self.read_channel()?,
        })
    }

    /// Three scaled channel bytes; alpha is [`OPAQUE_ALPHA`].
    pub fn read_color_rgb(&mut self) -> Result<Color> {
        Ok(Color {
            r: self.read_channel()?,
            g: self.read_channel()?,
            b: self.read_channel()?,
            a: OPAQUE_ALPHA,
        })
    }

    /// Four raw channel bytes.
    pub fn read_color32(&mut self) -> Result<Color32> {
        let [r, g, b, a] = self.read_u32()?.to_le_bytes();
        Ok(Color32 { r, g, b, a })
    }

    /// Three raw channel bytes; alpha is 255.
    pub fn read_color32_rgb(&mut self) -> Result<Color32> {
        Ok(Color32 {
            r: self.read_u8()?,
            g: self.read_u8()?,
            b: self.read_u8()?,
            a: u8::MAX,
        })
    }
}

impl Decode for Color {
    const SOURCE: HandlerSource = HandlerSource::Builtin;
    const MIN_WIRE_SIZE: usize = 4;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_color()
    }
}

impl Decode for Color32 {
    const SOURCE: HandlerSource = HandlerSource::Builtin;
    const MIN_WIRE_SIZE: usize = 4;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_color32()
    }
}
