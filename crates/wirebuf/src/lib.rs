// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # wirebuf - little-endian binary decoding engine
//!
//! Decodes values from a length-bounded byte buffer: fixed-width primitives,
//! length-prefixed text, count-prefixed sequences and maps, fixed-layout
//! domain values, and plain user types decoded field by field.
//!
//! ## Quick Start
//!
//! ```rust
//! use wirebuf::{Decode, Result};
//!
//! #[derive(Decode, Debug, PartialEq)]
//! struct Sample {
//!     id: i32,
//!     label: String,
//!     readings: Vec<f32>,
//! }
//!
//! fn main() -> Result<()> {
//!     let mut bytes = 7i32.to_le_bytes().to_vec();
//!     bytes.extend_from_slice(&[2, 0, b'o', b'k']);
//!     bytes.extend_from_slice(&1i32.to_le_bytes());
//!     bytes.extend_from_slice(&0.5f32.to_le_bytes());
//!
//!     let sample: Sample = wirebuf::decode_exact(&bytes)?;
//!     assert_eq!(sample.label, "ok");
//!     assert_eq!(sample.readings, vec![0.5]);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |  Cursor::read::<T>()                                          |
//! +---------------------------------------------------------------+
//! |  HandlerRegistry   cache -> memo -> custom -> builtin -> memo |
//! +-------------------------------+-------------------------------+
//! |  bound procedure              |  structural fallback          |
//! |  (custom / builtin handlers)  |  (precondition + cycle guard) |
//! +-------------------------------+-------------------------------+
//! |  composite: text, sequences, maps, domain values              |
//! +---------------------------------------------------------------+
//! |  Cursor: bounds-checked little-endian primitives              |
//! +---------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Cursor`] | Read position over a borrowed buffer window |
//! | [`Decode`] | Decoding contract, derivable with `#[derive(Decode)]` |
//! | [`HandlerRegistry`] | Concurrent per-type handler cache |
//! | [`DecoderConfig`] | Limits and interpretation switches |
//! | [`Error`] | Every failure the decoder reports |
//!
//! ## Derive attributes
//!
//! - `#[wire(custom)]` on a struct: decode with `Self::read_<snake_name>`.
//! - `#[wire(custom = "path::to::fn")]` on a struct: decode with that function.
//! - `#[wire(skip)]` on a field: not read; filled with `Default::default()`.

extern crate self as wirebuf;

pub mod composite;
pub mod config;
pub mod cursor;
pub mod decode;
pub mod error;
pub mod registry;
pub mod structural;
pub mod types;

pub use config::{ColorScale, DecoderConfig, TextMode};
pub use cursor::Cursor;
pub use decode::{Decode, FieldDescriptor, HandlerSource};
pub use error::{Error, Result};
pub use registry::{Handler, HandlerRegistry, LookupStats};
pub use types::{
    Color, Color32, Decimal, Matrix4x4, Timestamp, TimestampKind, Vector2, Vector3, Vector4,
    WChar,
};

/// Derive macro for [`Decode`].
pub use wirebuf_codegen::Decode;

/// Decode one `T` from the start of `bytes` with the global registry and the
/// installed configuration. Trailing bytes are ignored.
pub fn decode<T: Decode>(bytes: &[u8]) -> Result<T> {
    Cursor::new(bytes).read::<T>()
}

/// Like [`decode`], but fails with [`Error::TrailingBytes`] unless the value
/// consumes the whole buffer.
pub fn decode_exact<T: Decode>(bytes: &[u8]) -> Result<T> {
    let mut cursor = Cursor::new(bytes);
    let value = cursor.read::<T>()?;
    if !cursor.is_eof() {
        return Err(Error::TrailingBytes {
            remaining: cursor.remaining(),
        });
    }
    Ok(value)
}
