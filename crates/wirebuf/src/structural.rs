// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural fallback: field-by-field decoding of plain types.
//!
//! Runs only for types memoized as having no dedicated handler. The registry
//! checks the type once, on first use, and caches the verdict next to the
//! memo: types with zero decodable fields or with a field whose declared type
//! is the type itself are rejected (`Error::UnsupportedType`).
//!
//! Each call then:
//!
//! 1. Pushes a frame recording the type and the cursor position. Re-entering
//!    a type that is already on the stack at the same position means no byte
//!    was consumed in between (`A { b: B }`, `B { a: Box<A> }`), so decoding
//!    could never terminate; it fails with `Error::Cycle`. Recursion that
//!    consumes bytes (trees, linked lists behind a presence flag) is bounded
//!    by the data and only capped by `DecoderConfig::max_depth`.
//! 2. Runs the type's builder: every field is decoded into a local through
//!    `Cursor::read`, then the value is constructed in one step.

use std::any::TypeId;
use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::decode::Decode;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
struct Frame {
    id: TypeId,
    name: Cow<'static, str>,
    position: usize,
}

/// Structural frames of the decode call in progress.
#[derive(Debug, Default)]
pub(crate) struct FrameStack {
    frames: Vec<Frame>,
    depth: usize,
}

impl FrameStack {
    /// Empty stack for a child window that inherits this stack's depth.
    pub(crate) fn nested(&self) -> Self {
        Self {
            frames: Vec::new(),
            depth: self.depth,
        }
    }

    fn enter(
        &mut self,
        id: TypeId,
        name: Cow<'static, str>,
        position: usize,
        max_depth: usize,
    ) -> Result<()> {
        // Positions never decrease, so only the frames entered at the current
        // position can be a zero-progress re-entry.
        let reentered = self
            .frames
            .iter()
            .rev()
            .take_while(|frame| frame.position == position)
            .any(|frame| frame.id == id);

        if reentered {
            let path = self.path_from(id, &name);
            log::warn!("[structural] cycle detected: {}", path);
            return Err(Error::Cycle {
                type_name: name,
                path,
            });
        }

        if self.depth >= max_depth {
            log::warn!(
                "[structural] depth limit {} reached entering {}",
                max_depth,
                name
            );
            return Err(Error::DepthLimit { limit: max_depth });
        }

        self.frames.push(Frame { id, name, position });
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        if self.frames.pop().is_some() {
            self.depth -= 1;
        }
    }

    /// `A -> B -> A` rendering of the cycle ending in `id`.
    fn path_from(&self, id: TypeId, name: &str) -> String {
        let mut names: Vec<&str> = Vec::new();
        for frame in self.frames.iter().rev() {
            names.push(&frame.name);
            if frame.id == id {
                break;
            }
        }
        names.reverse();
        names.push(name);
        names.join(" -> ")
    }
}

/// Reject types structural decoding cannot handle.
pub fn check_preconditions<T: Decode>() -> Result<()> {
    let fields = T::fields();
    if fields.is_empty() {
        return Err(Error::UnsupportedType {
            type_name: T::type_name(),
            reason: "no decodable fields",
        });
    }
    if fields.iter().any(|field| field.identity == T::identity()) {
        return Err(Error::UnsupportedType {
            type_name: T::type_name(),
            reason: "field of its own type",
        });
    }
    Ok(())
}

/// Decode `T` field by field. Preconditions were checked at resolution.
pub(crate) fn decode<T: Decode>(cursor: &mut Cursor<'_>) -> Result<T> {
    let max_depth = cursor.config().max_depth;
    let position = cursor.position();
    cursor
        .frames
        .enter(TypeId::of::<T>(), T::type_name(), position, max_depth)?;
    let result = T::decode(cursor);
    cursor.frames.leave();
    result
}
