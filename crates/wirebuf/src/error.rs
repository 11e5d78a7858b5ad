// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for payload decoding.

use std::borrow::Cow;

/// Errors returned by wirebuf decode operations.
///
/// Every variant is fatal to the decode call that produced it. The surrounding
/// protocol layer is expected to drop the payload as corrupt or incompatible.
///
/// # Example
///
/// ```rust
/// use wirebuf::{Cursor, Error};
///
/// let mut cursor = Cursor::new(&[0x01]);
/// match cursor.read_u32() {
///     Err(Error::UnexpectedEof { needed, .. }) => assert_eq!(needed, 4),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Type Errors
    // ========================================================================
    /// Structural decoding is impossible for this type (no decodable fields,
    /// or a field of the type's own exact type).
    UnsupportedType {
        type_name: Cow<'static, str>,
        reason: &'static str,
    },
    /// A structural type was re-entered without an intervening collection,
    /// so decoding could never terminate.
    Cycle {
        type_name: Cow<'static, str>,
        path: String,
    },
    /// Structural nesting went deeper than the configured limit.
    DepthLimit { limit: usize },
    /// The cached handler does not produce the requested type.
    HandlerMismatch { type_name: Cow<'static, str> },

    // ========================================================================
    // Buffer Errors
    // ========================================================================
    /// An explicit count argument exceeds the bytes remaining.
    Bounds { requested: usize, remaining: usize },
    /// A fixed-width or count-driven read ran past the end of the buffer.
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    /// `decode_exact` finished with unread bytes.
    TrailingBytes { remaining: usize },

    // ========================================================================
    // Data Errors
    // ========================================================================
    /// A count prefix was negative.
    InvalidLength { context: &'static str, value: i64 },
    /// A count prefix exceeds the configured maximum.
    LengthLimit {
        context: &'static str,
        value: usize,
        limit: usize,
    },
    /// Non-ASCII byte in strict ASCII text mode.
    InvalidText { offset: usize, byte: u8 },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedType { type_name, reason } => {
                write!(f, "Unsupported type {}: {}", type_name, reason)
            }
            Error::Cycle { type_name, path } => {
                write!(f, "Cyclic type {} (path: {})", type_name, path)
            }
            Error::DepthLimit { limit } => {
                write!(f, "Structural nesting exceeds depth limit {}", limit)
            }
            Error::HandlerMismatch { type_name } => {
                write!(f, "Cached handler does not decode {}", type_name)
            }
            Error::Bounds {
                requested,
                remaining,
            } => write!(
                f,
                "Out of bounds: requested {} bytes, {} remaining",
                requested, remaining
            ),
            Error::UnexpectedEof {
                offset,
                needed,
                remaining,
            } => write!(
                f,
                "Unexpected end of buffer at offset {}: needed {} bytes, {} remaining",
                offset, needed, remaining
            ),
            Error::TrailingBytes { remaining } => {
                write!(f, "{} trailing bytes after value", remaining)
            }
            Error::InvalidLength { context, value } => {
                write!(f, "Invalid {}: {}", context, value)
            }
            Error::LengthLimit {
                context,
                value,
                limit,
            } => write!(f, "{} {} exceeds maximum allowed ({})", context, value, limit),
            Error::InvalidText { offset, byte } => {
                write!(f, "Non-ASCII byte 0x{:02x} at offset {}", byte, offset)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Convenient alias for decode results using the crate `Error` type.
pub type Result<T> = core::result::Result<T, Error>;
