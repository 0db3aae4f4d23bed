use bson::spec::BinarySubtype;
use bson::{doc, Document};
use bsonarch::bytes::Bytes;
use bsonarch::{Error, Load, Save};
use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Save, Load)]
struct V {
    string: String,
    b: bool,
    int: i32,
}

fn ground(doc: &Document) -> Vec<u8> {
    let mut bytes = vec![];
    doc.to_writer(&mut bytes).unwrap();
    bytes
}

fn parse(bytes: &[u8]) -> Document {
    Document::from_reader(&mut &bytes[..]).unwrap()
}

#[test]
fn test_bson_struct() {
    let v = V {
        string: "Hi!".to_owned(),
        b: false,
        int: 5,
    };

    let bin = bsonarch::bson::to_vec(&v).unwrap();
    let expected = ground(&doc! { "string": "Hi!", "b": false, "int": 5 });
    assert_eq!(bintext::hex::encode(&bin), bintext::hex::encode(&expected));

    let v1: V = bsonarch::bson::from_slice(&bin).unwrap();
    assert_eq!(v, v1);
}

macro_rules! test_primitive {
    ($p:expr, $t:ty, $bson:expr) => {{
        let value: $t = $p;
        let bin = bsonarch::bson::to_vec(&(value.clone(),)).unwrap();
        let expected = ground(&doc! { "value0": $bson });
        assert_eq!(bin, expected, "{}", stringify!($t));

        let (back,): ($t,) = bsonarch::bson::from_slice(&bin).unwrap();
        assert_eq!(back, value);
    }};
}

#[test]
fn test_bson_primitive() {
    test_primitive!(true, bool, true);
    test_primitive!(-7, i8, -7i32);
    test_primitive!(300, i16, 300i32);
    test_primitive!(i32::MIN, i32, i32::MIN);
    test_primitive!(255, u8, 255i32);
    test_primitive!(65535, u16, 65535i32);
    test_primitive!(u32::MAX, u32, u32::MAX as i64);
    test_primitive!(i64::MAX, i64, i64::MAX);
    test_primitive!(1 << 40, u64, 1i64 << 40);
    test_primitive!(12, usize, 12i64);
    test_primitive!(-12, isize, -12i64);
    test_primitive!(0.5, f32, 0.5f64);
    test_primitive!(-1.25e300, f64, -1.25e300f64);
    test_primitive!("Hello World!".to_string(), String, "Hello World!");
    test_primitive!(String::new(), String, "");
}

#[test]
fn test_bson_datetime_and_binary() {
    let when = Utc.timestamp_millis_opt(1_600_000_000_123).unwrap();
    let payload = Bytes::from(vec![0xAA, 0x55, 0x00]);

    let bin = bsonarch::bson::to_vec(&(when, payload.clone())).unwrap();
    let expected = ground(&doc! {
        "value0": bson::DateTime::from_millis(1_600_000_000_123),
        "value1": bson::Binary { subtype: BinarySubtype::Generic, bytes: vec![0xAA, 0x55, 0x00] }
    });
    assert_eq!(bin, expected);

    let (when1, payload1): (chrono::DateTime<Utc>, Bytes) = bsonarch::bson::from_slice(&bin).unwrap();
    assert_eq!(when1, when);
    assert_eq!(payload1, payload);
}

#[derive(Debug, PartialEq, Save, Load)]
struct Containers {
    list: Vec<i32>,
    maybe: Option<String>,
    nothing: Option<String>,
    scores: BTreeMap<String, i64>,
}

#[test]
fn test_bson_containers() {
    let mut scores = BTreeMap::new();
    scores.insert("a".to_string(), 1);
    scores.insert("b".to_string(), 2);

    let c = Containers {
        list: vec![3, 2, 1],
        maybe: Some("x".to_string()),
        nothing: None,
        scores,
    };

    let bin = bsonarch::bson::to_vec(&c).unwrap();
    let expected = ground(&doc! {
        "list": [3, 2, 1],
        "maybe": ["x"],
        "nothing": [],
        "scores": [
            { "key": "a", "value": 1i64 },
            { "key": "b", "value": 2i64 }
        ]
    });
    assert_eq!(parse(&bin), parse(&expected));
    assert_eq!(bin, expected);

    let c1: Containers = bsonarch::bson::from_slice(&bin).unwrap();
    assert_eq!(c, c1);
}

#[test]
fn test_read_foreign_document() {
    // Field order differs from the declaration order
    let bin = ground(&doc! { "int": 9, "extra": 1.5, "b": true, "string": "from bson" });
    let v: V = bsonarch::bson::from_slice(&bin).unwrap();
    assert_eq!(
        v,
        V {
            string: "from bson".to_string(),
            b: true,
            int: 9,
        }
    );
}

#[test]
fn test_long_widens_int() {
    let bin = ground(&doc! { "value0": 5i32 });
    let (n,): (i64,) = bsonarch::bson::from_slice(&bin).unwrap();
    assert_eq!(n, 5);

    // The other way around would lose data
    let bin = ground(&doc! { "value0": 5i64 });
    let r: bsonarch::Result<(i32,)> = bsonarch::bson::from_slice(&bin);
    assert!(matches!(r, Err(Error::TypeMismatch { .. })));
}

#[test]
fn test_out_of_range() {
    assert!(matches!(
        bsonarch::bson::to_vec(&(u64::MAX,)),
        Err(Error::OutOfRange("u64"))
    ));

    let bin = ground(&doc! { "value0": 256 });
    let r: bsonarch::Result<(u8,)> = bsonarch::bson::from_slice(&bin);
    assert!(matches!(r, Err(Error::OutOfRange("u8"))));

    let bin = ground(&doc! { "value0": -1i64 });
    let r: bsonarch::Result<(u32,)> = bsonarch::bson::from_slice(&bin);
    assert!(matches!(r, Err(Error::OutOfRange("u32"))));
}

#[test]
fn test_nul_in_key_is_rejected() {
    struct Bad;
    impl Save for Bad {
        fn save(&self, ar: &mut dyn bsonarch::OutputArchive) -> bsonarch::Result<()> {
            ar.start_node()?;
            ar.nvp("a\0b", &1)?;
            ar.finish_node()
        }
    }
    assert!(matches!(
        bsonarch::bson::to_vec(&Bad),
        Err(Error::InvalidKey(_))
    ));
}

#[test]
fn test_records_are_not_scalars() {
    // A bare scalar has no document to live in
    assert!(matches!(
        bsonarch::bson::to_vec(&5i32),
        Err(Error::Protocol(_))
    ));
    // Neither has a bare sequence
    assert!(matches!(
        bsonarch::bson::to_vec(&vec![1, 2]),
        Err(Error::TopLevelArray)
    ));
}

#[test]
fn test_read_old_binary() {
    // Subtype 2 repeats the payload length inside the payload
    let bin = ground(&doc! {
        "value0": bson::Binary { subtype: BinarySubtype::BinaryOld, bytes: vec![1, 2, 3] }
    });
    let (payload,): (Bytes,) = bsonarch::bson::from_slice(&bin).unwrap();
    assert_eq!(payload.into_inner(), vec![1, 2, 3]);
}
