// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use wirebuf::{Color, Cursor, Decimal, Matrix4x4, Timestamp};

fuzz_target!(|data: &[u8]| {
    // Count prefixes must never allocate past the buffer
    let _ = wirebuf::decode::<Vec<String>>(data);
    let _ = wirebuf::decode::<HashMap<u32, Vec<u8>>>(data);
    let _ = wirebuf::decode::<Box<[Matrix4x4]>>(data);

    // Mixed reads on one cursor
    let mut cursor = Cursor::new(data);
    let _ = cursor.read::<Color>();
    let _ = cursor.read::<Decimal>();
    let _ = cursor.read::<Timestamp>();
    if let Ok(mut window) = cursor.read_window(usize::from(data.first().copied().unwrap_or(0))) {
        let _ = window.read_string();
    }
    assert!(cursor.position() <= cursor.len());
});
