mod util;

use nd_containers::containers::{Array, Vector};
use nd_containers::ErrorKind;
use rand::Rng;

fn roundtrip(a: &Array<f64>) -> Array<f64> {
    let mut buf = Vec::new();
    a.save(&mut buf).unwrap();
    let mut back = Array::new();
    back.load(&mut &buf[..]).unwrap();
    back
}

#[test]
fn empty_singleton_and_large_arrays_roundtrip() {
    let mut rng = util::rng(7);
    let empty = Array::<f64>::new();
    assert_eq!(roundtrip(&empty), empty);
    let single = Array::<f64>::from_slice(&[3.25]);
    assert_eq!(roundtrip(&single), single);
    let large: Array<f64> = (0..1500).map(|_| rng.gen_range(-1e6..1e6)).collect();
    assert_eq!(roundtrip(&large), large);
}

#[test]
fn integer_arrays_roundtrip() {
    let a: Array<i16> = (-50..50).collect();
    let mut buf = Vec::new();
    a.save(&mut buf).unwrap();
    let mut back = Array::<i16>::new();
    back.load(&mut &buf[..]).unwrap();
    assert_eq!(back, a);
}

#[test]
fn element_type_mismatch_is_rejected() {
    let a = Array::<i32>::from_slice(&[1, 2, 3]);
    let mut buf = Vec::new();
    a.save(&mut buf).unwrap();
    let mut wrong = Array::<f64>::from_slice(&[9.0]);
    let e = wrong.load(&mut &buf[..]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Format);
    assert_eq!(wrong.as_slice(), &[9.0]);
}

#[test]
fn truncated_stream_is_an_io_error() {
    let a = Array::<f32>::from_slice(&[1.0, 2.0, 3.0]);
    let mut buf = Vec::new();
    a.save(&mut buf).unwrap();
    buf.truncate(buf.len() - 2);
    let mut back = Array::<f32>::new();
    assert_eq!(back.load(&mut &buf[..]).unwrap_err().kind(), ErrorKind::Io);
    assert!(back.is_empty());
}

#[test]
fn set_value_is_idempotent() {
    let mut a = Array::<u32>::with_value(10, 0).unwrap();
    a.set_value(4, 2, 7).unwrap();
    let once = a.clone();
    a.set_value(4, 2, 7).unwrap();
    assert_eq!(a, once);
    a.set_value(1, 5, 0).unwrap();
    assert_eq!(a.as_slice(), &[0, 0, 4, 4, 4, 1, 1, 1, 1, 1]);
}

#[test]
fn negative_sizes_are_value_errors() {
    assert_eq!(Array::<u8>::with_size(-1).unwrap_err().kind(), ErrorKind::Value);
    let mut a = Array::<u8>::from_slice(&[1, 2]);
    assert!(a.set_size(-3).is_err());
    assert_eq!(a.as_slice(), &[1, 2]);
}

#[test]
fn vector_saves_as_array() {
    let v = Vector::from(vec![1.0, -2.0, 0.5]);
    let mut buf = Vec::new();
    v.save(&mut buf).unwrap();
    let mut back = Vector::<f64>::new();
    back.load(&mut &buf[..]).unwrap();
    assert_eq!(back, v);
    assert_eq!(back.l2_norm(), (5.25f64).sqrt());
}
