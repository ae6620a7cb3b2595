//! Length-driven reinterpretation of captured bytes as common numeric types.
//!
//! The hint is a pure function of the buffer contents and length. Dispatch
//! goes through a closed table of exact lengths; anything outside the table
//! yields no hint at all. All multi-byte interpretations are little-endian.

type Decoder = fn(&[u8]) -> String;

/// Exact byte length to decoder. The set is closed: the hooked stream only
/// ever moves scalar fields (1/2/4/8 bytes) or a packed 3-double vector.
const DECODERS: &[(usize, Decoder)] = &[
    (1, hint_byte),
    (2, hint_word),
    (4, hint_dword),
    (8, hint_qword),
    (24, hint_vector3),
];

/// Best-effort display hint for a captured buffer, empty when the length
/// has no known interpretation.
pub fn data_hint(buf: &[u8]) -> String {
    DECODERS
        .iter()
        .find(|(len, _)| *len == buf.len())
        .map(|(_, decode)| decode(buf))
        .unwrap_or_default()
}

/// Eight binary digits, most significant bit first, with a `b` suffix.
pub fn binary_repr(byte: u8) -> String {
    format!("{:08b}b", byte)
}

fn hint_byte(buf: &[u8]) -> String {
    format!(
        "binary: {} uint8: {} int8: {}",
        binary_repr(buf[0]),
        buf[0],
        buf[0] as i8
    )
}

fn hint_word(buf: &[u8]) -> String {
    let raw = [buf[0], buf[1]];
    format!(
        "int16: {} uint16: {}\n[0] = {} [1] = {}",
        i16::from_le_bytes(raw),
        u16::from_le_bytes(raw),
        binary_repr(buf[0]),
        binary_repr(buf[1])
    )
}

fn hint_dword(buf: &[u8]) -> String {
    let raw = [buf[0], buf[1], buf[2], buf[3]];
    format!(
        "int32: {} uint32: {} float: {}",
        i32::from_le_bytes(raw),
        u32::from_le_bytes(raw),
        f32::from_le_bytes(raw)
    )
}

fn hint_qword(buf: &[u8]) -> String {
    let raw = [
        buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
    ];
    format!(
        "int64: {}\nuint64: {}\ndouble: {}",
        i64::from_le_bytes(raw),
        u64::from_le_bytes(raw),
        f64::from_le_bytes(raw)
    )
}

fn hint_vector3(buf: &[u8]) -> String {
    format!(
        "Vector3 X: {}\nVector3 Y: {}\nVector3 Z: {}",
        f64_at(buf, 0),
        f64_at(buf, 8),
        f64_at(buf, 16)
    )
}

fn f64_at(buf: &[u8], off: usize) -> f64 {
    f64::from_le_bytes([
        buf[off],
        buf[off + 1],
        buf[off + 2],
        buf[off + 3],
        buf[off + 4],
        buf[off + 5],
        buf[off + 6],
        buf[off + 7],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_repr_msb_first() {
        assert_eq!(binary_repr(0b1010_0101), "10100101b");
        assert_eq!(binary_repr(0), "00000000b");
        assert_eq!(binary_repr(0xFF), "11111111b");
    }

    #[test]
    fn test_hint_single_byte() {
        assert_eq!(data_hint(&[0x2A]), "binary: 00101010b uint8: 42 int8: 42");
        assert_eq!(data_hint(&[0xFF]), "binary: 11111111b uint8: 255 int8: -1");
    }

    #[test]
    fn test_hint_two_bytes_little_endian() {
        assert_eq!(
            data_hint(&[0x34, 0x12]),
            "int16: 4660 uint16: 4660\n[0] = 00110100b [1] = 00010010b"
        );
        assert!(data_hint(&[0x00, 0x80]).starts_with("int16: -32768 uint16: 32768"));
    }

    #[test]
    fn test_hint_four_bytes_int32() {
        // 0x2A little-endian: int32 = 42
        assert!(data_hint(&[0x2A, 0x00, 0x00, 0x00]).starts_with("int32: 42 uint32: 42"));
    }

    #[test]
    fn test_hint_four_bytes_float_one() {
        // IEEE-754 1.0f
        let hint = data_hint(&[0x00, 0x00, 0x80, 0x3F]);
        assert!(hint.contains("float: 1"));
        assert!(hint.contains("int32: 1065353216"));
        assert!(hint.contains("uint32: 1065353216"));
    }

    #[test]
    fn test_hint_eight_bytes() {
        let bytes = 1.0f64.to_le_bytes();
        let hint = data_hint(&bytes);
        assert!(hint.contains("double: 1"));
        assert!(hint.contains("int64: 4607182418800017408"));

        let all_ones = [0xFF; 8];
        let hint = data_hint(&all_ones);
        assert!(hint.contains("int64: -1"));
        assert!(hint.contains("uint64: 18446744073709551615"));
    }

    #[test]
    fn test_hint_vector3() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1.0f64.to_le_bytes());
        bytes.extend_from_slice(&2.0f64.to_le_bytes());
        bytes.extend_from_slice(&3.0f64.to_le_bytes());
        assert_eq!(
            data_hint(&bytes),
            "Vector3 X: 1\nVector3 Y: 2\nVector3 Z: 3"
        );
    }

    #[test]
    fn test_hint_unknown_lengths_are_empty() {
        for len in [0usize, 3, 5, 6, 7, 9, 16, 23, 25, 64] {
            assert_eq!(data_hint(&vec![0u8; len]), "", "length {}", len);
        }
    }
}
