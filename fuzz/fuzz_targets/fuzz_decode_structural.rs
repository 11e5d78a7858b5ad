// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use wirebuf::{Decode, Vector3};

#[allow(dead_code)]
#[derive(Decode)]
struct Node {
    id: u16,
    label: String,
    position: Vector3,
    children: Vec<Node>,
}

fuzz_target!(|data: &[u8]| {
    // Data-driven recursion is capped by the configured max depth
    let _ = wirebuf::decode::<Node>(data);
});
