use bson::doc;
use bsonarch::bson::{from_slice, to_vec};
use bsonarch::{Error, Load, Save};

#[derive(PartialEq, Debug, Save, Load)]
enum Tag {
    A,
    #[bsonarch(rename = "renamedB")]
    B,
}

#[derive(PartialEq, Debug, Save, Load)]
struct Example {
    x: String,
    t1: Tag,
    t2: Tag,
    n: Nested,
}

#[derive(PartialEq, Debug, Save, Load)]
struct Nested {
    y: Option<Vec<String>>,
    z: Option<String>,
}

fn example() -> Example {
    Example {
        x: "X".to_owned(),
        t1: Tag::A,
        t2: Tag::B,
        n: Nested {
            y: Some(vec!["Y".to_owned(), "Y".to_owned()]),
            z: None,
        },
    }
}

fn ground(doc: &bson::Document) -> Vec<u8> {
    let mut bytes = vec![];
    doc.to_writer(&mut bytes).unwrap();
    bytes
}

#[test]
fn test_ser() {
    let expected = ground(&doc! {
        "x": "X",
        "t1": "A",
        "t2": "renamedB",
        "n": { "y": [["Y", "Y"]], "z": [] }
    });
    assert_eq!(to_vec(&example()).unwrap(), expected);
}

#[test]
fn test_de() {
    let bin = ground(&doc! {
        "n": { "z": [], "y": [["Y", "Y"]] },
        "t2": "renamedB",
        "t1": "A",
        "x": "X"
    });
    let actual: Example = from_slice(&bin).unwrap();
    assert_eq!(actual, example());
}

#[test]
fn test_unknown_variant() {
    let bin = ground(&doc! { "value0": "C" });
    match from_slice::<(Tag,)>(&bin) {
        Err(Error::UnknownVariant(name)) => assert_eq!(name, "C"),
        other => panic!("unexpected {:?}", other),
    }
}

fn seven() -> u32 {
    7
}

#[derive(PartialEq, Debug, Save, Load)]
struct Defaults {
    #[bsonarch(rename = "id")]
    identifier: i64,
    #[bsonarch(default)]
    label: String,
    #[bsonarch(default = "seven")]
    retries: u32,
    #[bsonarch(skip)]
    scratch: Vec<u8>,
}

#[test]
fn test_defaults_and_skip() {
    let d = Defaults {
        identifier: 1,
        label: "l".to_owned(),
        retries: 2,
        scratch: vec![1, 2, 3],
    };
    let bin = to_vec(&d).unwrap();
    assert_eq!(bin, ground(&doc! { "id": 1i64, "label": "l", "retries": 2i64 }));

    let back: Defaults = from_slice(&bin).unwrap();
    assert_eq!(
        back,
        Defaults {
            scratch: vec![],
            ..d
        }
    );

    let back: Defaults = from_slice(&ground(&doc! { "id": 5i64 })).unwrap();
    assert_eq!(
        back,
        Defaults {
            identifier: 5,
            label: String::new(),
            retries: 7,
            scratch: vec![],
        }
    );
}

#[test]
fn test_missing_field() {
    let r = from_slice::<Defaults>(&ground(&doc! { "label": "l" }));
    match r {
        Err(Error::KeyNotFound(key)) => assert_eq!(key, "id"),
        other => panic!("unexpected {:?}", other),
    }
}

#[derive(PartialEq, Debug, Save, Load)]
struct Point(f64, f64, #[bsonarch(skip)] u8);

#[derive(PartialEq, Debug, Save, Load)]
struct Marker;

#[derive(PartialEq, Debug, Save, Load)]
struct Shape {
    points: Vec<Point>,
    marker: Marker,
}

#[test]
fn test_tuple_and_unit_structs() {
    let s = Shape {
        points: vec![Point(0.0, 1.0, 9), Point(2.5, -1.0, 9)],
        marker: Marker,
    };

    let bin = to_vec(&s).unwrap();
    let expected = ground(&doc! {
        "points": [
            { "value0": 0.0, "value1": 1.0 },
            { "value0": 2.5, "value1": -1.0 }
        ],
        "marker": {}
    });
    assert_eq!(bin, expected);

    let back: Shape = from_slice(&bin).unwrap();
    assert_eq!(back.points, vec![Point(0.0, 1.0, 0), Point(2.5, -1.0, 0)]);
    assert_eq!(back.marker, Marker);
}

#[derive(PartialEq, Debug, Save, Load)]
struct Wrapper<T> {
    inner: T,
    all: Vec<T>,
}

#[test]
fn test_generic() {
    let w = Wrapper {
        inner: Tag::A,
        all: vec![Tag::B, Tag::A],
    };
    let bin = to_vec(&w).unwrap();
    assert_eq!(
        bin,
        ground(&doc! { "inner": "A", "all": ["renamedB", "A"] })
    );
    let back: Wrapper<Tag> = from_slice(&bin).unwrap();
    assert_eq!(back, w);
}

mod renamed {
    extern crate bsonarch as other_name;

    use other_name::{Load, Save};

    #[derive(PartialEq, Debug, Save, Load)]
    #[bsonarch(crate = "other_name")]
    pub struct Reexported {
        pub n: i32,
    }
}

#[test]
fn test_crate_path() {
    let r = renamed::Reexported { n: 3 };
    let back: renamed::Reexported = from_slice(&to_vec(&r).unwrap()).unwrap();
    assert_eq!(back, r);
}
