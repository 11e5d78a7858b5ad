// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Calendar timestamp in packed 64-bit binary form.
//!
//! ```text
//! bits 0..=61  : ticks, 100 ns units since 0001-01-01T00:00:00
//! bits 62..=63 : kind (0 unspecified, 1 UTC, 2 and 3 local)
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::cursor::Cursor;
use crate::decode::{Decode, HandlerSource};
use crate::error::Result;

const TICKS_MASK: u64 = (1 << 62) - 1;
const KIND_SHIFT: u32 = 62;
const NANOS_PER_TICK: i128 = 100;

/// Ticks between 0001-01-01 and 1970-01-01.
pub const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// Clock a timestamp was taken against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampKind {
    Unspecified,
    Utc,
    Local,
}

/// Packed timestamp, kept bit-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_binary(raw: i64) -> Self {
        Self(raw)
    }

    /// Pack `ticks` (truncated to 62 bits) with `kind`.
    pub const fn new(ticks: u64, kind: TimestampKind) -> Self {
        let tag: u64 = match kind {
            TimestampKind::Unspecified => 0,
            TimestampKind::Utc => 1,
            TimestampKind::Local => 2,
        };
        Self(((ticks & TICKS_MASK) | (tag << KIND_SHIFT)) as i64)
    }

    pub const fn to_binary(self) -> i64 {
        self.0
    }

    pub const fn ticks(self) -> u64 {
        self.0 as u64 & TICKS_MASK
    }

    pub const fn kind(self) -> TimestampKind {
        match (self.0 as u64) >> KIND_SHIFT {
            0 => TimestampKind::Unspecified,
            1 => TimestampKind::Utc,
            _ => TimestampKind::Local,
        }
    }

    /// Signed nanoseconds relative to the Unix epoch, ignoring `kind`.
    pub fn to_unix_nanos(self) -> i128 {
        (i128::from(self.ticks()) - i128::from(UNIX_EPOCH_TICKS)) * NANOS_PER_TICK
    }

    /// Wall-clock time for UTC and unspecified stamps.
    ///
    /// `None` for local stamps (no offset on the wire) or if out of
    /// `SystemTime` range.
    pub fn to_system_time(self) -> Option<SystemTime> {
        if self.kind() == TimestampKind::Local {
            return None;
        }
        let nanos = self.to_unix_nanos();
        let magnitude = nanos.unsigned_abs();
        let secs = u64::try_from(magnitude / 1_000_000_000).ok()?;
        let offset = Duration::new(secs, (magnitude % 1_000_000_000) as u32);
        if nanos >= 0 {
            UNIX_EPOCH.checked_add(offset)
        } else {
            UNIX_EPOCH.checked_sub(offset)
        }
    }
}

impl Cursor<'_> {
    /// Packed timestamp stored as a little-endian i64.
    pub fn read_timestamp(&mut self) -> Result<Timestamp> {
        Ok(Timestamp::from_binary(self.read_i64()?))
    }
}

impl Decode for Timestamp {
    const SOURCE: HandlerSource = HandlerSource::Builtin;
    const MIN_WIRE_SIZE: usize = 8;

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_epoch_utc() {
        let stamp = Timestamp::new(UNIX_EPOCH_TICKS as u64, TimestampKind::Utc);
        let buf = stamp.to_binary().to_le_bytes();

        let mut cursor = Cursor::new(&buf);
        let decoded = cursor.read_timestamp().expect("Read timestamp should succeed");
        assert_eq!(decoded, stamp);
        assert_eq!(decoded.kind(), TimestampKind::Utc);
        assert_eq!(decoded.ticks(), UNIX_EPOCH_TICKS as u64);
        assert_eq!(decoded.to_unix_nanos(), 0);
        assert_eq!(decoded.to_system_time(), Some(UNIX_EPOCH));
    }

    #[test]
    fn test_kind_bits() {
        let local = Timestamp::from_binary(i64::MIN | 5);
        assert_eq!(local.kind(), TimestampKind::Local);
        assert_eq!(local.ticks(), 5);

        assert_eq!(local.to_system_time(), None);

        let unspecified = Timestamp::from_binary(42);
        assert_eq!(unspecified.kind(), TimestampKind::Unspecified);
    }

    #[test]
    fn test_one_second_after_epoch() {
        let stamp = Timestamp::new(UNIX_EPOCH_TICKS as u64 + 10_000_000, TimestampKind::Utc);
        assert_eq!(stamp.to_unix_nanos(), 1_000_000_000);
        assert_eq!(
            stamp.to_system_time(),
            Some(UNIX_EPOCH + Duration::from_secs(1))
        );
    }
}
