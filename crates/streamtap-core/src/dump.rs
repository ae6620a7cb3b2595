//! Hex dump rendering for captured buffers.
//!
//! # Output Format
//!
//! ```text
//! 0x000: 48 65 6C 6C 6F 20 57 6F  72 6C 64 00 00 00 00 00  |Hello World.....|
//! ```

/// Render bytes as a hexdump string, 16 bytes per row with an ASCII column.
/// Empty input renders as an empty string.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();

    for (i, chunk) in bytes.chunks(16).enumerate() {
        if i > 0 {
            out.push('\n');
        }

        let offset = i * 16;
        out.push_str(&format!("0x{:03X}: ", offset));

        // Hex bytes
        for (j, byte) in chunk.iter().enumerate() {
            if j == 8 {
                out.push(' ');
            }
            out.push_str(&format!("{:02X} ", byte));
        }

        // Padding for incomplete rows
        if chunk.len() < 16 {
            for j in chunk.len()..16 {
                if j == 8 {
                    out.push(' ');
                }
                out.push_str("   ");
            }
        }

        // ASCII representation
        out.push_str(" |");
        for byte in chunk {
            if (0x20..0x7F).contains(byte) {
                out.push(*byte as char);
            } else {
                out.push('.');
            }
        }
        for _ in chunk.len()..16 {
            out.push(' ');
        }
        out.push('|');
    }

    out
}
