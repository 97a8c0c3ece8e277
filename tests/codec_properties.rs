//! Property tests for the primitive codecs, decoded through the public
//! archive from bits laid down by the shared writer.

mod common;

use acadbits::io::dwg::reader::{DwgArchive, IDwgStreamReader};
use acadbits::DwgVersion;
use common::bits::BitWriter;
use proptest::prelude::*;
use std::io::Cursor;

fn archive(bytes: Vec<u8>) -> DwgArchive<Cursor<Vec<u8>>> {
    DwgArchive::from_bytes(bytes, DwgVersion::R2000).unwrap()
}

/// Writer with `skew` leading zero bits, so values start mid-byte.
fn skewed(skew: u8) -> BitWriter {
    let mut w = BitWriter::new();
    w.bits(0, skew);
    w
}

fn skip(a: &mut DwgArchive<Cursor<Vec<u8>>>, skew: u8) {
    for _ in 0..skew {
        a.read_bit().unwrap();
    }
}

// ===========================================================================
// Known encodings
// ===========================================================================

#[test]
fn test_modular_char_examples() {
    let mut a = archive(vec![0x81, 0x01]);
    assert_eq!(a.read_modular_char().unwrap(), 129);

    let mut a = archive(vec![0x41]);
    assert_eq!(a.read_signed_modular_char().unwrap(), -1);

    let mut a = archive(vec![0x81, 0x01]);
    assert_eq!(a.read_signed_modular_char().unwrap(), 129);

    // 0xC1 has the continuation bit set, so it is not a complete value.
    let mut a = archive(vec![0xC1]);
    assert!(a.read_signed_modular_char().is_err());

    for value in [0i64, 1, -1, 129, -129] {
        let mut w = BitWriter::new();
        w.mc(value);
        let mut a = archive(w.into_bytes());
        assert_eq!(a.read_signed_modular_char().unwrap(), value);
    }
}

#[test]
fn test_modular_short_example() {
    // Words 0x8005, 0x0001.
    let mut a = archive(vec![0x05, 0x80, 0x01, 0x00]);
    assert_eq!(a.read_modular_short().unwrap(), 32773);
    assert_eq!(a.remaining(), 0);
}

#[test]
fn test_bit_short_prefixes() {
    let mut w = BitWriter::new();
    w.bits(0b10, 2);
    w.bits(0b11, 2);
    w.bits(0b01, 2);
    w.rc(0xFF);
    w.bits(0b00, 2);
    w.rs(0xFFFE);
    let mut a = archive(w.into_bytes());
    assert_eq!(a.read_bit_short().unwrap(), 0);
    assert_eq!(a.read_bit_short().unwrap(), 256);
    assert_eq!(a.read_bit_short().unwrap(), 255);
    assert_eq!(a.read_bit_short().unwrap(), -2);
}

#[test]
fn test_bit_double_prefixes() {
    let mut w = BitWriter::new();
    w.bits(0b01, 2);
    w.bits(0b10, 2);
    w.bits(0b11, 2);
    let mut a = archive(w.into_bytes());
    assert_eq!(a.read_bit_double().unwrap(), 1.0);
    assert_eq!(a.read_bit_double().unwrap().to_bits(), 0.0f64.to_bits());
    assert!(a.read_bit_double().unwrap().is_nan());
}

#[test]
fn test_overlong_modular_values_rejected() {
    let mut a = archive(vec![0x80; 8]);
    assert!(a.read_signed_modular_char().is_err());

    let mut a = archive(vec![0x00, 0x80, 0x00, 0x80, 0x00, 0x80]);
    assert!(a.read_modular_short().is_err());
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn prop_bit_short(value in any::<i16>(), skew in 0u8..8) {
        let mut w = skewed(skew);
        w.bs(value);
        let mut a = archive(w.into_bytes());
        skip(&mut a, skew);
        prop_assert_eq!(a.read_bit_short().unwrap(), value);
    }

    #[test]
    fn prop_bit_long(value in any::<i32>(), skew in 0u8..8) {
        let mut w = skewed(skew);
        w.bl(value);
        let mut a = archive(w.into_bytes());
        skip(&mut a, skew);
        prop_assert_eq!(a.read_bit_long().unwrap(), value);
    }

    #[test]
    fn prop_bit_double(value in any::<f64>().prop_filter("not NaN", |v| !v.is_nan()), skew in 0u8..8) {
        let mut w = skewed(skew);
        w.bd(value);
        let mut a = archive(w.into_bytes());
        skip(&mut a, skew);
        prop_assert_eq!(a.read_bit_double().unwrap(), value);
    }

    #[test]
    fn prop_unsigned_modular_char(value in 0u64..(1 << 56)) {
        let mut w = BitWriter::new();
        w.umc(value);
        let len = w.len();
        let mut a = archive(w.into_bytes());
        prop_assert_eq!(a.read_modular_char().unwrap(), value);
        prop_assert_eq!(a.position().byte, len as u64);
    }

    #[test]
    fn prop_signed_modular_char(value in -((1i64 << 27) - 1)..(1i64 << 27)) {
        let mut w = BitWriter::new();
        w.mc(value);
        let mut a = archive(w.into_bytes());
        prop_assert_eq!(a.read_signed_modular_char().unwrap(), value);
        prop_assert_eq!(a.remaining(), 0);
    }

    #[test]
    fn prop_modular_short(value in 0u32..(1 << 30)) {
        let mut w = BitWriter::new();
        w.ms(value);
        let mut a = archive(w.into_bytes());
        prop_assert_eq!(a.read_modular_short().unwrap(), value);
        prop_assert_eq!(a.remaining(), 0);
    }

    /// Sequences of mixed values stay in step with each other.
    #[test]
    fn prop_mixed_sequence(values in proptest::collection::vec((any::<i16>(), any::<i32>(), any::<bool>()), 1..32)) {
        let mut w = BitWriter::new();
        for &(s, l, b) in &values {
            w.bs(s);
            w.bit(b);
            w.bl(l);
        }
        let mut a = archive(w.into_bytes());
        for &(s, l, b) in &values {
            prop_assert_eq!(a.read_bit_short().unwrap(), s);
            prop_assert_eq!(a.read_bit().unwrap(), b);
            prop_assert_eq!(a.read_bit_long().unwrap(), l);
        }
    }
}
