//! Call-site capture helpers shared by the read and write interceptors.
//!
//! Everything here is pure so the interceptor logic can be exercised without
//! a live hook: the handlers only add the call-through and the raw copy.

use crate::dump::hex_dump;
use crate::hint::data_hint;

/// Number of buffer bytes that are safe to inspect after a call-through.
///
/// The hooked routine reports how many bytes it actually moved. Negative or
/// zero returns carry no data, and a return larger than the requested size
/// is clamped so the capture never walks past the caller's buffer.
pub fn captured_len(size: i32, ret: i32) -> usize {
    if size <= 0 || ret <= 0 {
        return 0;
    }
    ret.min(size) as usize
}

/// Diagnostic line for one intercepted read: requested size, actual size,
/// hex dump, and the data hint when one exists.
pub fn read_log_line(size: i32, ret: i32, data: &[u8]) -> String {
    log_line("read", size, ret, data)
}

/// Diagnostic line for one intercepted write, same shape as the read line.
pub fn write_log_line(size: i32, ret: i32, data: &[u8]) -> String {
    log_line("write", size, ret, data)
}

fn log_line(op: &str, size: i32, ret: i32, data: &[u8]) -> String {
    let mut line = format!("{} {}, got {}:\n{}", op, size, ret, hex_dump(data));
    let hints = data_hint(data);
    if !hints.is_empty() {
        line.push('\n');
        line.push_str(&hints);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_len_clamps() {
        assert_eq!(captured_len(16, 8), 8);
        assert_eq!(captured_len(16, 16), 16);
        // The routine can report fewer bytes than requested but never more.
        assert_eq!(captured_len(4, 8), 4);
        assert_eq!(captured_len(16, 0), 0);
        assert_eq!(captured_len(16, -1), 0);
        assert_eq!(captured_len(-1, 5), 0);
        assert_eq!(captured_len(0, 0), 0);
    }

    #[test]
    fn test_read_log_line_with_hint() {
        let line = read_log_line(4, 4, &[0x00, 0x00, 0x80, 0x3F]);
        assert!(line.starts_with("read 4, got 4:\n"));
        assert!(line.contains("0x000: 00 00 80 3F"));
        assert!(line.contains("float: 1"));
    }

    #[test]
    fn test_read_log_line_without_hint() {
        // 3 bytes has no interpretation: no trailing hint block.
        let line = read_log_line(3, 3, &[0x01, 0x02, 0x03]);
        assert!(line.starts_with("read 3, got 3:\n"));
        assert!(line.ends_with('|'));
    }

    #[test]
    fn test_write_log_line() {
        let line = write_log_line(2, 2, &[0x34, 0x12]);
        assert!(line.starts_with("write 2, got 2:\n"));
        assert!(line.contains("int16: 4660"));
    }

    #[test]
    fn test_log_line_with_short_read() {
        let line = read_log_line(8, -1, &[]);
        assert_eq!(line, "read 8, got -1:\n");
    }
}
