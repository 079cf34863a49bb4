//! Sample decoding for decompressed blocks

use byteorder::{BigEndian, LittleEndian};

use crate::io::byte_order::ByteOrder;
use super::layout::SampleType;

/// Reverses horizontal differencing (predictor 2) in place
///
/// Each row holds `row_samples` samples; a sample is stored as the
/// difference to the sample `stride` positions before it in the same row.
pub fn undo_horizontal_predictor(
    data: &mut [u8],
    sample_type: SampleType,
    byte_order: ByteOrder,
    row_samples: usize,
    stride: usize,
) {
    match byte_order {
        ByteOrder::LittleEndian => undo_predictor::<LittleEndian>(data, sample_type.bytes(), row_samples, stride),
        ByteOrder::BigEndian => undo_predictor::<BigEndian>(data, sample_type.bytes(), row_samples, stride),
    }
}

fn undo_predictor<E: byteorder::ByteOrder>(data: &mut [u8], bytes: usize, row_samples: usize, stride: usize) {
    let row_len = row_samples * bytes;
    if row_len == 0 {
        return;
    }

    for row in data.chunks_exact_mut(row_len) {
        for i in stride..row_samples {
            let (cur, prev) = (i * bytes, (i - stride) * bytes);
            match bytes {
                1 => row[cur] = row[cur].wrapping_add(row[prev]),
                2 => {
                    let v = E::read_u16(&row[cur..]).wrapping_add(E::read_u16(&row[prev..]));
                    E::write_u16(&mut row[cur..], v);
                }
                4 => {
                    let v = E::read_u32(&row[cur..]).wrapping_add(E::read_u32(&row[prev..]));
                    E::write_u32(&mut row[cur..], v);
                }
                _ => {
                    let v = E::read_u64(&row[cur..]).wrapping_add(E::read_u64(&row[prev..]));
                    E::write_u64(&mut row[cur..], v);
                }
            }
        }
    }
}

/// Decodes the sample starting at `bytes[0]`
pub fn read_sample(bytes: &[u8], sample_type: SampleType, byte_order: ByteOrder) -> f64 {
    match byte_order {
        ByteOrder::LittleEndian => decode::<LittleEndian>(bytes, sample_type),
        ByteOrder::BigEndian => decode::<BigEndian>(bytes, sample_type),
    }
}

fn decode<E: byteorder::ByteOrder>(bytes: &[u8], sample_type: SampleType) -> f64 {
    match sample_type {
        SampleType::U8 => bytes[0] as f64,
        SampleType::I8 => bytes[0] as i8 as f64,
        SampleType::U16 => E::read_u16(bytes) as f64,
        SampleType::I16 => E::read_i16(bytes) as f64,
        SampleType::U32 => E::read_u32(bytes) as f64,
        SampleType::I32 => E::read_i32(bytes) as f64,
        SampleType::F32 => E::read_f32(bytes) as f64,
        SampleType::F64 => E::read_f64(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_predictor_u16_little_endian() {
        // Two rows of three samples: [100, 5, 7] -> [100, 105, 112]
        let deltas: [u16; 6] = [100, 5, 7, 200, 65535, 2];
        let mut data: Vec<u8> = deltas.iter().flat_map(|v| v.to_le_bytes()).collect();

        undo_horizontal_predictor(&mut data, SampleType::U16, ByteOrder::LittleEndian, 3, 1);

        let values: Vec<u16> = data.chunks(2).map(|c| u16::from_le_bytes([c[0], c[1]])).collect();
        assert_eq!(values, vec![100, 105, 112, 200, 199, 201]);
    }

    #[test]
    fn test_undo_predictor_interleaved_bytes() {
        // Two samples per pixel: each channel accumulates on its own
        let mut data = vec![10, 20, 1, 2, 1, 2];
        undo_horizontal_predictor(&mut data, SampleType::U8, ByteOrder::BigEndian, 6, 2);
        assert_eq!(data, vec![10, 20, 11, 22, 12, 24]);
    }

    #[test]
    fn test_read_samples() {
        assert_eq!(read_sample(&[0x01, 0x02], SampleType::U16, ByteOrder::BigEndian), 258.0);
        assert_eq!(read_sample(&[0x01, 0x02], SampleType::U16, ByteOrder::LittleEndian), 513.0);
        assert_eq!(read_sample(&[0xFF], SampleType::I8, ByteOrder::LittleEndian), -1.0);
        assert_eq!(read_sample(&(-12.5f32).to_le_bytes(), SampleType::F32, ByteOrder::LittleEndian), -12.5);
        assert_eq!(read_sample(&(0.25f64).to_be_bytes(), SampleType::F64, ByteOrder::BigEndian), 0.25);
    }
}
