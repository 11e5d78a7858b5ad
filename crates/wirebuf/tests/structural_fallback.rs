// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Structural fallback and derive attributes, end to end through the public API.

#![allow(clippy::float_cmp)]

mod common;

use common::Payload;
use wirebuf::{Cursor, Decode, DecoderConfig, Error, HandlerRegistry, HandlerSource};

#[derive(Decode, Debug, PartialEq)]
struct Pair {
    a: i32,
    b: i32,
}

#[derive(Decode, Debug, PartialEq)]
struct Pixel(u8, u8);

#[derive(Decode, Debug, PartialEq)]
struct Empty {}

#[derive(Decode, Debug, PartialEq)]
struct Marker;

#[allow(dead_code)]
#[derive(Decode, Debug, PartialEq)]
struct OnlySkipped {
    #[wire(skip)]
    cache: u32,
}

#[allow(dead_code)]
#[derive(Decode, Debug)]
struct Chain {
    value: u8,
    next: Box<Chain>,
}

#[allow(dead_code)]
#[derive(Decode, Debug)]
struct Left {
    right: Right,
}

#[allow(dead_code)]
#[derive(Decode, Debug)]
struct Right {
    left: Box<Left>,
    tag: u8,
}

#[derive(Decode, Debug, PartialEq)]
struct Node {
    value: u8,
    children: Vec<Node>,
}

#[derive(Decode, Debug, PartialEq)]
#[wire(custom)]
struct Heading(f32);

impl Heading {
    fn read_heading(cursor: &mut Cursor<'_>) -> wirebuf::Result<Self> {
        Ok(Heading(f32::from(cursor.read_u16()?) / 100.0))
    }
}

#[derive(Decode, Debug, PartialEq)]
#[wire(custom = "decode_celsius")]
struct Celsius(f32);

fn decode_celsius(cursor: &mut Cursor<'_>) -> wirebuf::Result<Celsius> {
    Ok(Celsius(f32::from(cursor.read_i16()?) / 10.0))
}

#[derive(Decode, Debug, PartialEq)]
struct Ship {
    name: String,
    heading: Heading,
    hull: Celsius,
}

#[derive(Decode, Debug, PartialEq)]
struct Cached {
    id: u16,
    #[wire(skip)]
    hits: u32,
    label: String,
}

#[derive(Decode, Debug, PartialEq)]
struct Tagged<T> {
    tag: u8,
    value: T,
}

#[derive(Decode, Debug, PartialEq)]
struct Item {
    value: u8,
    next: Link,
}

/// Presence flag, then the next item if set.
#[derive(Decode, Debug, PartialEq)]
#[wire(custom)]
struct Link(Option<Box<Item>>);

impl Link {
    fn read_link(cursor: &mut Cursor<'_>) -> wirebuf::Result<Self> {
        if cursor.read_bool()? {
            Ok(Link(Some(cursor.read::<Box<Item>>()?)))
        } else {
            Ok(Link(None))
        }
    }
}

#[derive(Decode, Debug, PartialEq)]
struct Nest {
    tag: u8,
    inner: Wrapped,
}

/// u8 byte length, then a nested `Nest` decoded inside its own window.
#[derive(Decode, Debug, PartialEq)]
#[wire(custom)]
struct Wrapped(Option<Box<Nest>>);

impl Wrapped {
    fn read_wrapped(cursor: &mut Cursor<'_>) -> wirebuf::Result<Self> {
        let len = usize::from(cursor.read_u8()?);
        if len == 0 {
            return Ok(Wrapped(None));
        }
        let mut window = cursor.read_window(len)?;
        Ok(Wrapped(Some(window.read::<Box<Nest>>()?)))
    }
}

#[test]
fn structural_two_int_struct() {
    let registry = HandlerRegistry::new();
    let bytes = Payload::new().i32(1).i32(2).build();
    let mut cursor = Cursor::with_registry(&bytes, &registry);

    let pair = cursor.read::<Pair>().expect("structural decode should succeed");
    assert_eq!(pair, Pair { a: 1, b: 2 });
    assert_eq!(cursor.position(), 8);
    assert!(registry.is_structural::<Pair>());
    assert!(!registry.is_cached::<Pair>());
    assert!(registry.is_cached::<i32>());
}

#[test]
fn structural_memo_is_reused() {
    let registry = HandlerRegistry::new();
    let bytes = Payload::new().i32(1).i32(2).i32(3).i32(4).build();
    let mut cursor = Cursor::with_registry(&bytes, &registry);

    cursor.read::<Pair>().expect("first decode");
    let misses = registry.stats().misses;
    cursor.read::<Pair>().expect("second decode");

    let stats = registry.stats();
    assert_eq!(stats.misses, misses);
    assert_eq!(stats.structural, 2);
}

#[test]
fn structural_tuple_struct() {
    let pixel: Pixel = wirebuf::decode_exact(&[3, 4]).expect("decode pixel");
    assert_eq!(pixel, Pixel(3, 4));
    assert_eq!(<Pixel as Decode>::MIN_WIRE_SIZE, 2);
}

#[test]
fn structural_field_descriptors() {
    let fields = Pair::fields();
    let names: Vec<&str> = fields.iter().map(|f| f.name).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(fields[0].type_name, "i32");
    assert_eq!(<Pair as Decode>::SOURCE, HandlerSource::Structural);
    assert_eq!(<Pair as Decode>::MIN_WIRE_SIZE, 8);
}

#[test]
fn structural_rejects_types_without_fields() {
    let bytes = [0u8; 8];
    for err in [
        wirebuf::decode::<Empty>(&bytes).unwrap_err(),
        wirebuf::decode::<Marker>(&bytes).unwrap_err(),
        wirebuf::decode::<OnlySkipped>(&bytes).unwrap_err(),
    ] {
        assert!(
            matches!(
                err,
                Error::UnsupportedType {
                    reason: "no decodable fields",
                    ..
                }
            ),
            "unexpected error: {err}"
        );
    }
}

#[test]
fn structural_rejects_direct_self_reference() {
    let bytes = [0u8; 16];
    let err = wirebuf::decode::<Chain>(&bytes).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedType {
            type_name: "Chain".into(),
            reason: "field of its own type",
        }
    );
}

#[test]
fn structural_rejects_indirect_cycle() {
    let bytes = [0u8; 16];
    let err = wirebuf::decode::<Left>(&bytes).unwrap_err();
    assert_eq!(
        err,
        Error::Cycle {
            type_name: "Left".into(),
            path: "Left -> Right -> Left".into(),
        }
    );
}

#[test]
fn structural_recursion_through_sequence_is_data_bounded() {
    let bytes = Payload::new()
        .u8(1)
        .count(2)
        .u8(2)
        .count(0)
        .u8(3)
        .count(0)
        .build();

    let tree: Node = wirebuf::decode_exact(&bytes).expect("decode tree");
    assert_eq!(tree.value, 1);
    assert_eq!(
        tree.children,
        vec![
            Node {
                value: 2,
                children: Vec::new()
            },
            Node {
                value: 3,
                children: Vec::new()
            },
        ]
    );
}

#[test]
fn structural_recursion_through_custom_handler_is_data_bounded() {
    let bytes = Payload::new().u8(1).bool(true).u8(2).bool(false).build();

    let list: Item = wirebuf::decode_exact(&bytes).expect("decode linked list");
    assert_eq!(
        list,
        Item {
            value: 1,
            next: Link(Some(Box::new(Item {
                value: 2,
                next: Link(None),
            }))),
        }
    );
}

#[test]
fn structural_depth_limit() {
    let bytes = Payload::new()
        .u8(1)
        .count(1)
        .u8(2)
        .count(1)
        .u8(3)
        .count(0)
        .build();

    let mut cursor =
        Cursor::new(&bytes).with_config(DecoderConfig::default().with_max_depth(2));
    assert_eq!(
        cursor.read::<Node>().unwrap_err(),
        Error::DepthLimit { limit: 2 }
    );
}

#[test]
fn custom_handlers_override_structural() {
    let registry = HandlerRegistry::new();
    let bytes = Payload::new().text("Argo").u16(9000).i16(-55).build();
    let mut cursor = Cursor::with_registry(&bytes, &registry);

    let ship = cursor.read::<Ship>().expect("decode ship");
    assert_eq!(ship.name, "Argo");
    assert_eq!(ship.heading, Heading(90.0));
    assert_eq!(ship.hull, Celsius(-5.5));
    assert!(cursor.is_eof());

    let heading = registry.handler::<Heading>().expect("heading handler");
    assert_eq!(heading.source(), HandlerSource::Custom);
    let celsius = registry.handler::<Celsius>().expect("celsius handler");
    assert_eq!(celsius.source(), HandlerSource::Custom);
    assert!(registry.is_structural::<Ship>());
}

#[test]
fn skipped_fields_take_default() {
    let bytes = Payload::new().u16(7).text("x").build();
    let cached: Cached = wirebuf::decode_exact(&bytes).expect("decode cached");
    assert_eq!(
        cached,
        Cached {
            id: 7,
            hits: 0,
            label: "x".to_string(),
        }
    );
    assert_eq!(Cached::fields().len(), 2);
}

#[test]
fn generic_structural_type() {
    let bytes = Payload::new().u8(1).u32(0xAABB_CCDD).build();
    let tagged: Tagged<u32> = wirebuf::decode_exact(&bytes).expect("decode tagged");
    assert_eq!(
        tagged,
        Tagged {
            tag: 1,
            value: 0xAABB_CCDD
        }
    );
    assert_eq!(<Tagged<u32> as Decode>::MIN_WIRE_SIZE, 5);
}

#[test]
fn truncated_structural_payload_fails() {
    let bytes = Payload::new().i32(1).u16(0).build();
    assert!(matches!(
        wirebuf::decode::<Pair>(&bytes),
        Err(Error::UnexpectedEof { needed: 4, .. })
    ));
}

#[test]
fn structural_depth_carries_into_windows() {
    let bytes = Payload::new().u8(1).u8(4).u8(2).u8(2).u8(3).u8(0).build();

    let mut cursor =
        Cursor::new(&bytes).with_config(DecoderConfig::default().with_max_depth(2));
    assert_eq!(
        cursor.read::<Nest>().unwrap_err(),
        Error::DepthLimit { limit: 2 }
    );

    let nest: Nest = wirebuf::decode_exact(&bytes).expect("decode nested windows");
    assert_eq!(nest.tag, 1);
    let middle = nest.inner.0.expect("middle level present");
    assert_eq!(middle.tag, 2);
    let inner = middle.inner.0.expect("inner level present");
    assert_eq!(inner.tag, 3);
    assert_eq!(inner.inner, Wrapped(None));
}
