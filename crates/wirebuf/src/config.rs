// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoder configuration: static limits plus a process-wide runtime snapshot.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: compile-time defaults (sequence cap, depth cap, color divisors)
//! - **Level 2 (Dynamic)**: [`DecoderConfig`] installed process-wide via `ArcSwap`
//!
//! Cursors take a snapshot of the current config when they are constructed, so
//! swapping the config never changes the rules in the middle of a decode call.
//!
//! ## Environment
//!
//! - `WIREBUF_MAX_SEQUENCE_LEN`: maximum element count for sequences and maps
//! - `WIREBUF_MAX_DEPTH`: maximum structural nesting depth
//! - `WIREBUF_COLOR_SCALE`: `legacy` (divide by 100) or `normalized` (divide by 255)
//! - `WIREBUF_TEXT_MODE`: `latin1` (lossless byte-to-char) or `ascii` (reject bytes > 0x7F)
//!
//! # Example
//!
//! ```rust
//! use wirebuf::config::{self, ColorScale, DecoderConfig};
//!
//! let cfg = DecoderConfig::default()
//!     .with_max_depth(16)
//!     .with_color_scale(ColorScale::Normalized);
//! assert_eq!(cfg.max_depth, 16);
//! assert_eq!(cfg.color_scale.divisor(), config::NORMALIZED_COLOR_DIVISOR);
//! ```

use arc_swap::ArcSwap;
use std::env;
use std::sync::{Arc, OnceLock};

/// Maximum sequence/map element count accepted by default.
///
/// Far beyond any legitimate payload while still catching allocation bombs.
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 1_000_000;

/// Maximum structural nesting depth accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Color channel divisor used by the paired encoder (channel range `[0, 2.55]`).
pub const LEGACY_COLOR_DIVISOR: f32 = 100.0;

/// Conventional normalized color divisor (channel range `[0, 1]`).
pub const NORMALIZED_COLOR_DIVISOR: f32 = 255.0;

pub const ENV_MAX_SEQUENCE_LEN: &str = "WIREBUF_MAX_SEQUENCE_LEN";
pub const ENV_MAX_DEPTH: &str = "WIREBUF_MAX_DEPTH";
pub const ENV_COLOR_SCALE: &str = "WIREBUF_COLOR_SCALE";
pub const ENV_TEXT_MODE: &str = "WIREBUF_TEXT_MODE";

/// Scale applied to byte color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScale {
    /// Divide by 100 (bit-compatible with existing encoders).
    #[default]
    Legacy,
    /// Divide by 255.
    Normalized,
}

impl ColorScale {
    #[must_use]
    pub fn divisor(self) -> f32 {
        match self {
            ColorScale::Legacy => LEGACY_COLOR_DIVISOR,
            ColorScale::Normalized => NORMALIZED_COLOR_DIVISOR,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("legacy") || s == "100" {
            Some(ColorScale::Legacy)
        } else if s.eq_ignore_ascii_case("normalized") || s == "255" {
            Some(ColorScale::Normalized)
        } else {
            None
        }
    }
}

/// Handling of single-byte text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Every byte maps to the code point of the same value (no validation, lossless).
    #[default]
    Latin1,
    /// Bytes above 0x7F are rejected with `Error::InvalidText`.
    StrictAscii,
}

impl TextMode {
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("latin1") {
            Some(TextMode::Latin1)
        } else if s.eq_ignore_ascii_case("ascii") || s.eq_ignore_ascii_case("strict") {
            Some(TextMode::StrictAscii)
        } else {
            None
        }
    }
}

/// Runtime decoder limits and behavior switches.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    /// Maximum element count for a sequence or map.
    pub max_sequence_len: usize,
    /// Maximum number of nested structural frames.
    pub max_depth: usize,
    /// Color channel divisor selection.
    pub color_scale: ColorScale,
    /// Single-byte text handling.
    pub text_mode: TextMode,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
            color_scale: ColorScale::default(),
            text_mode: TextMode::default(),
        }
    }
}

impl DecoderConfig {
    #[must_use]
    pub fn with_max_sequence_len(mut self, limit: usize) -> Self {
        self.max_sequence_len = limit;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    #[must_use]
    pub fn with_color_scale(mut self, scale: ColorScale) -> Self {
        self.color_scale = scale;
        self
    }

    #[must_use]
    pub fn with_text_mode(mut self, mode: TextMode) -> Self {
        self.text_mode = mode;
        self
    }

    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Unparseable values are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(ENV_MAX_SEQUENCE_LEN).filter(|s| !s.is_empty()) {
            match raw.parse::<usize>() {
                Ok(v) => cfg.max_sequence_len = v,
                Err(_) => log::warn!("[config] ignoring {}={:?}", ENV_MAX_SEQUENCE_LEN, raw),
            }
        }

        if let Some(raw) = lookup(ENV_MAX_DEPTH).filter(|s| !s.is_empty()) {
            match raw.parse::<usize>() {
                Ok(v) => cfg.max_depth = v,
                Err(_) => log::warn!("[config] ignoring {}={:?}", ENV_MAX_DEPTH, raw),
            }
        }

        if let Some(raw) = lookup(ENV_COLOR_SCALE).filter(|s| !s.is_empty()) {
            match ColorScale::parse(&raw) {
                Some(v) => cfg.color_scale = v,
                None => log::warn!("[config] ignoring {}={:?}", ENV_COLOR_SCALE, raw),
            }
        }

        if let Some(raw) = lookup(ENV_TEXT_MODE).filter(|s| !s.is_empty()) {
            match TextMode::parse(&raw) {
                Some(v) => cfg.text_mode = v,
                None => log::warn!("[config] ignoring {}={:?}", ENV_TEXT_MODE, raw),
            }
        }

        cfg
    }
}

static CURRENT: OnceLock<ArcSwap<DecoderConfig>> = OnceLock::new();

fn slot() -> &'static ArcSwap<DecoderConfig> {
    CURRENT.get_or_init(|| ArcSwap::from_pointee(DecoderConfig::from_env()))
}

/// Snapshot of the process-wide configuration.
///
/// Initialized from the environment on first access.
#[must_use]
pub fn current() -> Arc<DecoderConfig> {
    slot().load_full()
}

/// Replace the process-wide configuration. Existing cursors keep their snapshot.
pub fn install(config: DecoderConfig) {
    log::debug!("[config] installing {:?}", config);
    slot().store(Arc::new(config));
}
