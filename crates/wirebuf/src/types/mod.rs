// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-layout domain values.

pub mod color;
pub mod decimal;
pub mod timestamp;
pub mod vector;
pub mod wchar;

pub use color::{Color, Color32, OPAQUE_ALPHA};
pub use decimal::Decimal;
pub use timestamp::{Timestamp, TimestampKind, UNIX_EPOCH_TICKS};
pub use vector::{Matrix4x4, Vector2, Vector3, Vector4};
pub use wchar::WChar;
