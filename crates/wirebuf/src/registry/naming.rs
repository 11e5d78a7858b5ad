// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Human-readable type names for errors and logs.

/// Render a compiler type path as a short display name.
///
/// - array and slice types render as `"Array"`
/// - generic arguments are stripped (`alloc::vec::Vec<i32>` -> `"Vec"`)
/// - module paths are stripped (`game::net::Player` -> `"Player"`)
pub fn render_type_name(raw: &str) -> String {
    let raw = raw.trim().trim_start_matches('&').trim_start_matches("mut ");
    if raw.starts_with('[') {
        return "Array".to_string();
    }
    let base = raw.split('<').next().unwrap_or(raw);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
