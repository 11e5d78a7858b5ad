// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoding contract and built-in primitive handlers.
//!
//! Every decodable type declares, at compile time, where its decode procedure
//! comes from ([`HandlerSource`]). The handler registry uses that declaration
//! to resolve a type exactly once and cache the result.
//!
//! Three ways to provide a handler:
//!
//! - **Built-in**: primitives, text, collections and domain values ship with
//!   `HandlerSource::Builtin` impls.
//! - **Custom**: `#[derive(Decode)]` with `#[wire(custom)]`, or a manual impl
//!   declaring `HandlerSource::Custom`.
//! - **Structural**: plain `#[derive(Decode)]`; fields are decoded one by one
//!   in declaration order.
//!
//! # Example
//!
//! ```rust
//! use wirebuf::{Cursor, Decode, HandlerSource, Result};
//!
//! struct Heading(f32);
//!
//! impl Decode for Heading {
//!     const SOURCE: HandlerSource = HandlerSource::Custom;
//!     const MIN_WIRE_SIZE: usize = 2;
//!
//!     fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
//!         // Degrees packed as centi-degrees.
//!         Ok(Heading(f32::from(cursor.read_u16()?) / 100.0))
//!     }
//! }
//!
//! let heading: Heading = wirebuf::decode(&[0x10, 0x27]).unwrap();
//! assert_eq!(heading.0, 100.0);
//! ```

use std::any::TypeId;
use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::error::Result;
use crate::registry::naming::render_type_name;

/// Where a type's decode procedure comes from, in resolution priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerSource {
    /// Supplied by the type itself; overrides everything else.
    Custom,
    /// Shipped with the crate (primitives, text, collections, domain values).
    Builtin,
    /// No dedicated handler; decoded field by field.
    Structural,
}

/// Decoding contract.
///
/// `decode` is the type's procedure. Callers go through [`Cursor::read`],
/// which resolves and caches the procedure and enforces structural guards.
pub trait Decode: Sized + 'static {
    /// Handler source used by the resolution algorithm.
    const SOURCE: HandlerSource;

    /// Smallest number of bytes one encoded value can occupy.
    ///
    /// Used to reject count prefixes that cannot fit in the remaining buffer
    /// before anything is allocated.
    const MIN_WIRE_SIZE: usize = 0;

    /// Human-readable name used in errors and logs.
    fn type_name() -> Cow<'static, str> {
        Cow::Owned(render_type_name(std::any::type_name::<Self>()))
    }

    /// Identity used by the direct self-reference guard.
    ///
    /// Transparent wrappers (`Box<T>`) report the identity of what they wrap.
    fn identity() -> TypeId {
        TypeId::of::<Self>()
    }

    /// Decodable fields, in declaration order. Empty for non-structural types.
    fn fields() -> Vec<FieldDescriptor> {
        Vec::new()
    }

    /// Decode one value, advancing the cursor.
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self>;
}

/// One decodable field of a structural type.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub identity: TypeId,
    pub type_name: Cow<'static, str>,
}

impl FieldDescriptor {
    /// Describe a field named `name` whose declared type is `T`.
    pub fn of<T: Decode>(name: &'static str) -> Self {
        Self {
            name,
            identity: T::identity(),
            type_name: T::type_name(),
        }
    }
}

/// Generate built-in `Decode` impls that forward to a cursor primitive read.
macro_rules! impl_decode_primitive {
    ($type:ty, $read:ident, $size:expr) => {
        impl Decode for $type {
            const SOURCE: HandlerSource = HandlerSource::Builtin;
            const MIN_WIRE_SIZE: usize = $size;

            fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
                cursor.$read()
            }
        }
    };
}

impl_decode_primitive!(bool, read_bool, 1);
impl_decode_primitive!(u8, read_u8, 1);
impl_decode_primitive!(i8, read_i8, 1);
impl_decode_primitive!(u16, read_u16, 2);
impl_decode_primitive!(i16, read_i16, 2);
impl_decode_primitive!(u32, read_u32, 4);
impl_decode_primitive!(i32, read_i32, 4);
impl_decode_primitive!(u64, read_u64, 8);
impl_decode_primitive!(i64, read_i64, 8);
impl_decode_primitive!(f32, read_f32, 4);
impl_decode_primitive!(f64, read_f64, 8);
