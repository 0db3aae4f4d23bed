use bson::doc;
use bsonarch::bson::{from_slice, to_vec, BsonReader};
use bsonarch::{InputArchive, Load, Save};
use std::collections::{HashMap, VecDeque};

fn ground(doc: &bson::Document) -> Vec<u8> {
    let mut bytes = vec![];
    doc.to_writer(&mut bytes).unwrap();
    bytes
}

#[derive(Debug, Default, PartialEq, Save, Load)]
struct Tree {
    label: String,
    children: Vec<Tree>,
}

fn chain(depth: usize) -> Tree {
    let mut tree = Tree {
        label: "leaf".to_owned(),
        children: vec![],
    };
    for i in 0..depth {
        tree = Tree {
            label: i.to_string(),
            children: vec![tree],
        };
    }
    tree
}

#[test]
fn test_round_trip_deeply_nested() {
    let tree = chain(50);
    let bin = to_vec(&tree).unwrap();
    // Parses with the reference implementation as well
    bson::Document::from_reader(&mut &bin[..]).unwrap();

    let back: Tree = from_slice(&bin).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn test_empty_containers() {
    let value: (Vec<i32>, Vec<Vec<i32>>, Tree, Option<Tree>) = (
        vec![],
        vec![vec![], vec![1], vec![]],
        Tree::default(),
        None,
    );

    let bin = to_vec(&value).unwrap();
    let expected = ground(&doc! {
        "value0": [],
        "value1": [[], [1], []],
        "value2": { "label": "", "children": [] },
        "value3": []
    });
    assert_eq!(bin, expected);

    let back: (Vec<i32>, Vec<Vec<i32>>, Tree, Option<Tree>) = from_slice(&bin).unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_empty_sizes_read_back() {
    let bin = to_vec(&(Vec::<bool>::new(), Tree::default())).unwrap();
    let mut r = BsonReader::from_slice(&bin).unwrap();

    r.start_node().unwrap();
    r.start_node().unwrap();
    assert_eq!(r.load_size().unwrap(), 0);
    r.finish_node().unwrap();

    r.start_node().unwrap();
    r.set_next_name("children");
    r.start_node().unwrap();
    assert_eq!(r.load_size().unwrap(), 0);
    r.finish_node().unwrap();
    r.finish_node().unwrap();
    r.finish_node().unwrap();
    assert_eq!(r.depth(), 0);
}

#[test]
fn test_sequences_of_maps() {
    let mut first = HashMap::new();
    first.insert(1u8, vec!["one".to_owned()]);
    first.insert(2u8, vec!["two".to_owned(), "deux".to_owned()]);
    let value: VecDeque<HashMap<u8, Vec<String>>> = vec![first, HashMap::new()].into_iter().collect();

    let bin = to_vec(&(value.clone(),)).unwrap();
    let back: (VecDeque<HashMap<u8, Vec<String>>>,) = from_slice(&bin).unwrap();
    assert_eq!(back.0, value);
}

#[test]
fn test_nested_tuples() {
    let value = ((1, (2, "x".to_owned())), Some((true, 0.5)));
    let bin = to_vec(&value).unwrap();
    let expected = ground(&doc! {
        "value0": { "value0": 1, "value1": { "value0": 2, "value1": "x" } },
        "value1": [{ "value0": true, "value1": 0.5 }]
    });
    assert_eq!(bin, expected);

    let back: ((i32, (i32, String)), Option<(bool, f64)>) = from_slice(&bin).unwrap();
    assert_eq!(back, value);
}
