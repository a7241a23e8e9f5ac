//! Integration tests for the message contract.

use bytes::Bytes;
use protowire_codec::{
    map, marshal, unmarshal, Decoder, Encoder, Error, Message, MessageExt, WireType,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
struct Leaf {
    id: u32,
    name: String,
}

impl Message for Leaf {
    fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
        while !decoder.is_eof() {
            let tag = decoder.read_tag()?;
            match tag.field_number {
                1 => self.id = decoder.read_var_u32()?,
                2 => self.name = decoder.read_string()?,
                _ => decoder.skip_wire_type(tag.wire_type)?,
            }
        }
        Ok(())
    }

    fn write_to(&self, encoder: &mut Encoder) {
        if self.id != 0 {
            encoder.write_tag(1, WireType::Varint);
            encoder.write_var_u32(self.id);
        }
        if !self.name.is_empty() {
            encoder.write_tag(2, WireType::LengthDelimited);
            encoder.write_string(&self.name);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Choice {
    Text(String),
    Number(i64),
    Leaf(Leaf),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Tree {
    weight: f32,
    delta: i32,
    offset: i64,
    checksum: u64,
    flag: bool,
    blob: Bytes,
    leaves: Vec<Leaf>,
    samples: Vec<i64>,
    sizes: Vec<u32>,
    root: Option<Leaf>,
    index: BTreeMap<String, i32>,
    choice: Option<Choice>,
}

impl Message for Tree {
    fn merge_from(&mut self, decoder: &mut Decoder) -> Result<(), Error> {
        while !decoder.is_eof() {
            let tag = decoder.read_tag()?;
            match tag.field_number {
                1 => self.weight = decoder.read_float()?,
                2 => self.delta = decoder.read_zigzag32()?,
                3 => self.offset = decoder.read_zigzag64()?,
                4 => self.checksum = decoder.read_fixed64()?,
                5 => self.flag = decoder.read_bool()?,
                6 => self.blob = decoder.read_bytes()?,
                7 => {
                    let mut leaf = Leaf::default();
                    decoder.read_message(&mut leaf)?;
                    self.leaves.push(leaf);
                }
                8 => decoder.merge_repeated(
                    tag.wire_type,
                    WireType::Varint,
                    &mut self.samples,
                    Decoder::read_varint_signed,
                )?,
                9 => decoder.merge_repeated(
                    tag.wire_type,
                    WireType::Fixed32,
                    &mut self.sizes,
                    Decoder::read_fixed32,
                )?,
                10 => decoder.read_message(self.root.get_or_insert_with(Leaf::default))?,
                11 => {
                    let (key, value) =
                        map::read_entry(decoder, Decoder::read_string, Decoder::read_var_i32)?;
                    self.index.insert(key, value);
                }
                12 => self.choice = Some(Choice::Text(decoder.read_string()?)),
                13 => self.choice = Some(Choice::Number(decoder.read_varint_signed()?)),
                14 => {
                    // A repeated occurrence of the same message member merges into it.
                    let mut leaf = match self.choice.take() {
                        Some(Choice::Leaf(leaf)) => leaf,
                        _ => Leaf::default(),
                    };
                    decoder.read_message(&mut leaf)?;
                    self.choice = Some(Choice::Leaf(leaf));
                }
                _ => decoder.skip_wire_type(tag.wire_type)?,
            }
        }
        Ok(())
    }

    fn write_to(&self, encoder: &mut Encoder) {
        if self.weight != 0.0 {
            encoder.write_tag(1, WireType::Fixed32);
            encoder.write_float(self.weight);
        }
        if self.delta != 0 {
            encoder.write_tag(2, WireType::Varint);
            encoder.write_zigzag32(self.delta);
        }
        if self.offset != 0 {
            encoder.write_tag(3, WireType::Varint);
            encoder.write_zigzag64(self.offset);
        }
        if self.checksum != 0 {
            encoder.write_tag(4, WireType::Fixed64);
            encoder.write_fixed64(self.checksum);
        }
        if self.flag {
            encoder.write_tag(5, WireType::Varint);
            encoder.write_bool(self.flag);
        }
        if !self.blob.is_empty() {
            encoder.write_tag(6, WireType::LengthDelimited);
            encoder.write_bytes(&self.blob);
        }
        for leaf in &self.leaves {
            encoder.write_message(7, leaf);
        }
        encoder.write_packed(8, &self.samples, |e, v| e.write_varint_signed(*v));
        encoder.write_packed(9, &self.sizes, |e, v| e.write_fixed32(*v));
        if let Some(root) = &self.root {
            encoder.write_message(10, root);
        }
        for (key, value) in &self.index {
            map::write_entry(
                encoder,
                11,
                |e| {
                    e.write_tag(map::KEY_FIELD, WireType::LengthDelimited);
                    e.write_string(key);
                },
                |e| {
                    e.write_tag(map::VALUE_FIELD, WireType::Varint);
                    e.write_var_i32(*value);
                },
            );
        }
        match &self.choice {
            Some(Choice::Text(text)) => {
                encoder.write_tag(12, WireType::LengthDelimited);
                encoder.write_string(text);
            }
            Some(Choice::Number(number)) => {
                encoder.write_tag(13, WireType::Varint);
                encoder.write_varint_signed(*number);
            }
            Some(Choice::Leaf(leaf)) => encoder.write_message(14, leaf),
            None => {}
        }
    }
}

fn sample_tree() -> Tree {
    Tree {
        weight: 100.1,
        delta: -12,
        offset: i64::MIN,
        checksum: 12_345_678,
        flag: true,
        blob: Bytes::from_static(b"hello world"),
        leaves: vec![
            Leaf {
                id: 1,
                name: "ms1".into(),
            },
            Leaf::default(),
            Leaf {
                id: u32::MAX,
                name: "ms3".into(),
            },
        ],
        samples: vec![1, 2, 3, -1],
        sizes: vec![0, 7, u32::MAX],
        root: Some(Leaf {
            id: 0,
            name: "zomg".into(),
        }),
        index: BTreeMap::from([("k1".to_string(), 1), ("k2".to_string(), -2)]),
        choice: Some(Choice::Text("oneofstring".into())),
    }
}

fn random_tree(rng: &mut StdRng) -> Tree {
    let mut leaf = || Leaf {
        id: rng.gen(),
        name: (0..rng.gen_range(0..8))
            .map(|_| rng.gen_range('a'..='z'))
            .collect(),
    };
    let leaves = (0..3).map(|_| leaf()).collect();
    let root = Some(leaf());
    let choice = match rng.gen_range(0..4) {
        0 => None,
        1 => Some(Choice::Text("x".repeat(rng.gen_range(0..300)))),
        2 => Some(Choice::Number(rng.gen())),
        _ => Some(Choice::Leaf(Leaf {
            id: rng.gen(),
            name: String::new(),
        })),
    };
    Tree {
        weight: rng.gen(),
        delta: rng.gen(),
        offset: rng.gen(),
        checksum: rng.gen(),
        flag: rng.gen(),
        blob: (0..rng.gen_range(0..64)).map(|_| rng.gen::<u8>()).collect(),
        leaves,
        samples: (0..rng.gen_range(0..16)).map(|_| rng.gen()).collect(),
        sizes: (0..rng.gen_range(0..16)).map(|_| rng.gen()).collect(),
        root,
        index: (0..rng.gen_range(0..5))
            .map(|i| (format!("key{i}"), rng.gen()))
            .collect(),
        choice,
    }
}

#[test]
fn test_round_trip() {
    let tree = sample_tree();
    let decoded = Tree::decode(tree.encode()).unwrap();
    assert_eq!(decoded, tree);
}

#[test]
fn test_round_trip_random() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let tree = random_tree(&mut rng);
        let mut decoded = Tree::default();
        unmarshal(marshal(&tree), &mut decoded).unwrap();
        assert_eq!(decoded, tree);
    }
}

#[test]
fn test_default_encodes_empty() {
    assert!(Tree::default().encode().is_empty());
}

#[test]
fn test_repeated_fields_accumulate_across_unmarshal() {
    let tree = Tree {
        samples: vec![1, 2],
        leaves: vec![Leaf {
            id: 1,
            name: String::new(),
        }],
        ..Default::default()
    };
    let raw = tree.encode();
    let mut target = Tree::default();
    unmarshal(raw.clone(), &mut target).unwrap();
    unmarshal(raw, &mut target).unwrap();
    assert_eq!(target.samples, vec![1, 2, 1, 2]);
    assert_eq!(target.leaves.len(), 2);
}

#[test]
fn test_unpacked_repeated_accepted() {
    let mut encoder = Encoder::new();
    for sample in [5i64, -5] {
        encoder.write_tag(8, WireType::Varint);
        encoder.write_varint_signed(sample);
    }
    encoder.write_tag(9, WireType::Fixed32);
    encoder.write_fixed32(9);
    let tree = Tree::decode(encoder.finish()).unwrap();
    assert_eq!(tree.samples, vec![5, -5]);
    assert_eq!(tree.sizes, vec![9]);
}

#[test]
fn test_embedded_message_merges() {
    let mut encoder = Encoder::new();
    encoder.write_with(10, |e| {
        e.write_tag(1, WireType::Varint);
        e.write_var_u32(7);
    });
    encoder.write_with(10, |e| {
        e.write_tag(2, WireType::LengthDelimited);
        e.write_string("later");
    });
    let tree = Tree::decode(encoder.finish()).unwrap();
    assert_eq!(
        tree.root,
        Some(Leaf {
            id: 7,
            name: "later".into()
        })
    );
}

#[test]
fn test_oneof_last_member_wins() {
    let mut encoder = Encoder::new();
    encoder.write_tag(12, WireType::LengthDelimited);
    encoder.write_string("first");
    encoder.write_tag(13, WireType::Varint);
    encoder.write_varint_signed(-7);
    let tree = Tree::decode(encoder.finish()).unwrap();
    assert_eq!(tree.choice, Some(Choice::Number(-7)));

    let mut encoder = Encoder::new();
    encoder.write_tag(13, WireType::Varint);
    encoder.write_varint_signed(3);
    encoder.write_tag(12, WireType::LengthDelimited);
    encoder.write_string("second");
    let tree = Tree::decode(encoder.finish()).unwrap();
    assert_eq!(tree.choice, Some(Choice::Text("second".into())));
}

#[test]
fn test_map_last_key_wins() {
    let mut encoder = Encoder::new();
    for (key, value) in [("a", 1), ("b", 2), ("a", 3)] {
        map::write_entry(
            &mut encoder,
            11,
            |e| {
                e.write_tag(map::KEY_FIELD, WireType::LengthDelimited);
                e.write_string(key);
            },
            |e| {
                e.write_tag(map::VALUE_FIELD, WireType::Varint);
                e.write_var_i32(value);
            },
        );
    }
    let tree = Tree::decode(encoder.finish()).unwrap();
    assert_eq!(
        tree.index,
        BTreeMap::from([("a".to_string(), 3), ("b".to_string(), 2)])
    );
}

#[test]
fn test_skip_lands_on_known_field() {
    let mut encoder = Encoder::new();
    encoder.write_tag(100, WireType::Varint);
    encoder.write_varint(u64::MAX);
    encoder.write_tag(101, WireType::Fixed64);
    encoder.write_fixed64(1);
    encoder.write_tag(102, WireType::LengthDelimited);
    encoder.write_bytes(&[0xFF; 300]);
    encoder.write_tag(103, WireType::Fixed32);
    encoder.write_fixed32(1);
    encoder.write_with(104, |e| {
        e.write_tag(1, WireType::Varint);
        e.write_varint(1);
    });
    let known = encoder.len();
    encoder.write_tag(5, WireType::Varint);
    encoder.write_bool(true);
    let raw = encoder.finish();

    // Walk the raw bytes by hand: after five skips the cursor sits on the known tag.
    let mut decoder = Decoder::new(raw.clone());
    for _ in 0..5 {
        let tag = decoder.read_tag().unwrap();
        decoder.skip_wire_type(tag.wire_type).unwrap();
    }
    assert_eq!(decoder.position(), known);
    assert_eq!(decoder.read_tag().unwrap().field_number, 5);

    // Unknown fields are dropped on re-encode.
    let tree = Tree::decode(raw).unwrap();
    assert!(tree.flag);
    assert_eq!(&tree.encode()[..], &[0x28, 0x01]);
}

#[test]
fn test_truncated_input_rejected() {
    let raw = sample_tree().encode();
    // Every proper prefix either decodes to a partial tree or fails cleanly; none panic.
    let mut failures = 0;
    for cut in 0..raw.len() {
        if Tree::decode(raw.slice(..cut)).is_err() {
            failures += 1;
        }
    }
    assert!(failures > 0);
}

#[test]
fn test_truncated_length_delimited() {
    // Field 6 declares 11 bytes, only 5 follow.
    let raw = Bytes::from_static(b"\x32\x0bhello");
    assert_eq!(Tree::decode(raw), Err(Error::BufferOverrun(11, 5)));
}

#[test]
fn test_zero_field_number() {
    for wire_type in [0u8, 1, 2, 5] {
        let raw = vec![0x28, 0x01, wire_type];
        assert_eq!(
            Tree::decode(raw),
            Err(Error::InvalidTag(u64::from(wire_type)))
        );
    }
}

#[test]
fn test_group_wire_type_rejected() {
    // field 20, wire type 3 (start group)
    let raw = vec![0xA3, 0x01];
    assert_eq!(Tree::decode(raw), Err(Error::UnknownWireType(3)));
}

#[test]
fn test_sibling_submessages_decode_in_parallel() {
    let tree = sample_tree();
    let raw = tree.encode();

    // Collect the raw sub-decoders of every leaf, then decode them on separate threads.
    let mut decoder = Decoder::new(raw);
    let mut subs = Vec::new();
    while !decoder.is_eof() {
        let tag = decoder.read_tag().unwrap();
        if tag.field_number == 7 {
            subs.push(decoder.read_sub_decoder().unwrap());
        } else {
            decoder.skip_wire_type(tag.wire_type).unwrap();
        }
    }
    let leaves: Vec<Leaf> = std::thread::scope(|scope| {
        let handles: Vec<_> = subs
            .into_iter()
            .map(|mut sub| {
                scope.spawn(move || {
                    let mut leaf = Leaf::default();
                    leaf.merge_from(&mut sub).unwrap();
                    leaf
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(leaves, tree.leaves);
}
