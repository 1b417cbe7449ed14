use anvil_nbt::{decode, encode, kind::Kind, mca::Region, tree::Tree, Error};

#[test]
fn scenario_single_byte_tag() {
    let mut tree = Tree::new();
    let hello = tree.create_byte(Some("hello".into()), 42);
    let bytes = encode::encode(&tree, hello).unwrap();
    assert_eq!(
        bytes,
        vec![0x01, 0x00, 0x05, b'h', b'e', b'l', b'l', b'o', 0x2A]
    );

    let decoded = decode::decode(&bytes).unwrap();
    assert_eq!(decoded.tree.name(decoded.root).unwrap(), Some("hello"));
    assert_eq!(decoded.tree.as_i64(decoded.root).unwrap(), 42);
}

#[test]
fn scenario_empty_compound() {
    let mut tree = Tree::new();
    let x = tree.create_compound(Some("x".into()));
    let bytes = encode::encode(&tree, x).unwrap();
    assert_eq!(bytes, vec![0x0A, 0x00, 0x01, b'x', 0x00]);
}

#[test]
fn scenario_list_of_ints_inside_named_compound() {
    let mut tree = Tree::new();
    let root = tree.create_compound(None);
    let list = tree.create_list(Some("L".into()), Kind::Int);
    let one = tree.create_int(None, 1);
    let two = tree.create_int(None, 2);
    tree.append(list, one).unwrap();
    tree.append(list, two).unwrap();
    tree.append(root, list).unwrap();

    let bytes = encode::encode(&tree, root).unwrap();
    assert_eq!(
        bytes,
        vec![
            0x0A, 0x00, 0x00, // compound, unnamed
            0x09, 0x00, 0x01, b'L', // list tag "L"
            0x03, 0x00, 0x00, 0x00, 0x02, // element kind Int, length 2
            0x00, 0x00, 0x00, 0x01, // 1
            0x00, 0x00, 0x00, 0x02, // 2
            0x00, // compound End
        ]
    );
}

#[test]
fn scenario_supplementary_plane_string() {
    let s = "A\u{1D11E}";
    let mut tree = Tree::new();
    let root = tree.create_string(None, s.into());
    let bytes = encode::encode(&tree, root).unwrap();
    // tag id(1) + name length(2, zero) + string length(2, =7) + the 7-byte MUTF-8 payload.
    assert_eq!(&bytes[3..5], &[0x00, 0x07]);
    assert_eq!(&bytes[5..], &[0x41, 0xED, 0xA0, 0xB4, 0xED, 0xB4, 0x9E]);

    let decoded = decode::decode(&bytes).unwrap();
    assert_eq!(decoded.tree.as_str(decoded.root).unwrap(), s);
}

#[test]
fn scenario_gzip_framed_payload_round_trips() {
    let mut tree = Tree::new();
    let x = tree.create_compound(Some("x".into()));
    let bytes = encode::encode_with(
        &tree,
        x,
        anvil_nbt::Format::Gzip,
        None,
        &mut anvil_nbt::Progress::none(),
        &anvil_nbt::Messages::default(),
    )
    .unwrap();
    assert_eq!(&bytes[0..2], &[0x1F, 0x8B]);

    let decoded = decode::decode(&bytes).unwrap();
    assert_eq!(decoded.tree.name(decoded.root).unwrap(), Some("x"));
    assert_eq!(decoded.tree.child_count(decoded.root).unwrap(), 0);
}

#[test]
fn scenario_malformed_list_element_kind_end() {
    let mut bytes = vec![0x09, 0x00, 0x00]; // list tag, unnamed
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x01]); // element kind End, length 1
    assert!(matches!(decode::decode(&bytes), Err(Error::BadList)));
}

#[test]
fn boundary_empty_list_with_end_kind_round_trips() {
    let mut tree = Tree::new();
    let list = tree.create_list(Some("empty".into()), Kind::End);
    let bytes = encode::encode(&tree, list).unwrap();
    let decoded = decode::decode(&bytes).unwrap();
    assert_eq!(decoded.tree.element_kind(decoded.root).unwrap(), Kind::End);
    assert_eq!(decoded.tree.child_count(decoded.root).unwrap(), 0);
}

#[test]
fn boundary_truncated_buffer_never_yields_a_partial_tree() {
    let mut tree = Tree::new();
    let root = tree.create_compound(Some("full".into()));
    let age = tree.create_int(Some("age".into()), 7);
    tree.append(root, age).unwrap();
    let bytes = encode::encode(&tree, root).unwrap();

    for prefix in 0..bytes.len() {
        let result = decode::decode(&bytes[..prefix]);
        assert!(matches!(result, Err(Error::UnexpectedEndOfInput)));
    }
}

#[test]
fn boundary_rejects_four_byte_utf8_leaders() {
    for leader in 0xF0u8..=0xFF {
        let result = anvil_nbt::decode::decode(&[0x08, 0x00, 0x00, 0x00, 0x01, leader]);
        assert!(matches!(result, Err(Error::BadUtf8)), "leader {leader:#x} should be rejected");
    }
}

#[test]
fn boundary_nul_round_trips_through_c0_80() {
    let mut tree = Tree::new();
    let root = tree.create_string(None, "\0".into());
    let bytes = encode::encode(&tree, root).unwrap();
    assert_eq!(&bytes[5..], &[0xC0, 0x80]);
    let decoded = decode::decode(&bytes).unwrap();
    assert_eq!(decoded.tree.as_str(decoded.root).unwrap(), "\0");
}

#[test]
fn round_trip_tree_built_via_api_is_structurally_equal() {
    let mut tree = Tree::new();
    let root = tree.create_compound(Some("Level".into()));
    let name = tree.create_string(Some("name".into()), "Bananrama".into());
    let nested = tree.create_compound(Some("nested".into()));
    let flag = tree.create_byte(Some("flag".into()), 1);
    tree.append(nested, flag).unwrap();
    tree.append(root, name).unwrap();
    tree.append(root, nested).unwrap();

    let bytes = encode::encode(&tree, root).unwrap();
    let decoded = decode::decode(&bytes).unwrap();

    assert_eq!(decoded.tree.name(decoded.root).unwrap(), Some("Level"));
    assert_eq!(decoded.tree.child_count(decoded.root).unwrap(), 2);
    let found_name = decoded.tree.child_by_name(decoded.root, "name").unwrap().unwrap();
    assert_eq!(decoded.tree.as_str(found_name).unwrap(), "Bananrama");
    let found_nested = decoded.tree.child_by_name(decoded.root, "nested").unwrap().unwrap();
    let found_flag = decoded.tree.child_by_name(found_nested, "flag").unwrap().unwrap();
    assert_eq!(decoded.tree.as_i64(found_flag).unwrap(), 1);
}

#[test]
fn mca_round_trip_preserves_slots_and_timestamps_and_is_sector_aligned() {
    let mut tree = Tree::new();
    let root = tree.create_compound(Some("".into()));
    let version = tree.create_int(Some("DataVersion".into()), 3465);
    tree.append(root, version).unwrap();

    let mut region = Region::new();
    region.set_decoded_chunk(0, 0, &tree, root, 111).unwrap();
    region.set_decoded_chunk(16, 16, &tree, root, 222).unwrap();
    region.set_decoded_chunk(31, 31, &tree, root, 333).unwrap();

    let bytes = region.write();
    assert_eq!(bytes.len() % 4096, 0, "file length must be a multiple of 4096");

    let read_back = Region::read(&bytes, false).unwrap();
    for (coords, timestamp) in [((0, 0), 111), ((16, 16), 222), ((31, 31), 333)] {
        let (original_data, _) = region.chunk(coords.0, coords.1).unwrap();
        let (read_data, read_timestamp) = read_back.chunk(coords.0, coords.1).unwrap();
        assert_eq!(original_data, read_data);
        assert_eq!(read_timestamp, timestamp);
    }
    assert!(read_back.chunk(1, 1).is_none());
}
