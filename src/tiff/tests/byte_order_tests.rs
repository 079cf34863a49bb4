//! Tests for the byte order strategies

use std::io::Cursor;
use byteorder::{LittleEndian, BigEndian, WriteBytesExt};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler, LittleEndianHandler, BigEndianHandler};
use crate::tiff::errors::TiffError;

#[test]
fn test_byte_order_detection() {
    let mut little = Cursor::new(b"II".to_vec());
    assert_eq!(ByteOrder::detect(&mut little).unwrap(), ByteOrder::LittleEndian);

    let mut big = Cursor::new(b"MM".to_vec());
    assert_eq!(ByteOrder::detect(&mut big).unwrap(), ByteOrder::BigEndian);
}

#[test]
fn test_byte_order_detection_invalid() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x1234).unwrap();
    let mut cursor = Cursor::new(buffer);

    assert!(matches!(ByteOrder::detect(&mut cursor), Err(TiffError::InvalidByteOrder(0x1234))));
}

#[test]
fn test_little_endian_handler() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x1234).unwrap();
    buffer.write_u32::<LittleEndian>(0x12345678).unwrap();
    buffer.write_u64::<LittleEndian>(0x1234567890ABCDEF).unwrap();
    buffer.write_f64::<LittleEndian>(10.5).unwrap();
    let mut cursor = Cursor::new(buffer);

    let handler = LittleEndianHandler;

    assert_eq!(handler.read_u16(&mut cursor).unwrap(), 0x1234);
    assert_eq!(handler.read_u32(&mut cursor).unwrap(), 0x12345678);
    assert_eq!(handler.read_u64(&mut cursor).unwrap(), 0x1234567890ABCDEF);
    assert_eq!(handler.read_f64(&mut cursor).unwrap(), 10.5);
}

#[test]
fn test_created_handler_matches_marker() {
    let mut buffer = b"MM".to_vec();
    buffer.write_u16::<BigEndian>(42).unwrap();
    let mut cursor = Cursor::new(buffer);

    let handler = ByteOrder::detect(&mut cursor).unwrap().create_handler();
    assert_eq!(handler.read_u16(&mut cursor).unwrap(), 42);
}

#[test]
fn test_big_endian_handler() {
    let mut buffer = Vec::new();
    buffer.write_u16::<BigEndian>(0x1234).unwrap();
    buffer.write_u32::<BigEndian>(0x12345678).unwrap();
    buffer.write_f32::<BigEndian>(0.25).unwrap();
    let mut cursor = Cursor::new(buffer);

    let handler = BigEndianHandler;

    assert_eq!(handler.read_u16(&mut cursor).unwrap(), 0x1234);
    assert_eq!(handler.read_u32(&mut cursor).unwrap(), 0x12345678);
    assert_eq!(handler.read_f32(&mut cursor).unwrap(), 0.25);
}
