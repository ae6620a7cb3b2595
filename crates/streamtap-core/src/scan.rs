//! Wildcard-aware byte pattern scanning.
//!
//! The scanner anchors on the first concrete byte of the pattern and lets
//! `memchr` skip to candidate positions, so wildcard-heavy signatures do not
//! degrade into a naive byte-by-byte walk over the whole image.

use memchr::memchr;

use crate::module::ModuleMemory;

/// Position of the first pattern match in `data`, or `None`.
pub fn find_pattern(data: &[u8], pattern: &[Option<u8>]) -> Option<usize> {
    if pattern.is_empty() || data.len() < pattern.len() {
        return None;
    }

    let last = data.len() - pattern.len();
    let Some((anchor, anchor_byte)) = anchor_of(pattern) else {
        // All wildcards match anywhere.
        return Some(0);
    };

    let upper = last + anchor;
    let mut from = anchor;
    while from <= upper {
        let pos = from + memchr(anchor_byte, &data[from..=upper])?;
        let start = pos - anchor;
        if matches_at(data, start, pattern) {
            return Some(start);
        }
        from = pos + 1;
    }

    None
}

/// Positions of every pattern match in `data`, including overlapping ones.
pub fn find_all_patterns(data: &[u8], pattern: &[Option<u8>]) -> Vec<usize> {
    let mut results = Vec::new();
    if pattern.is_empty() || data.len() < pattern.len() {
        return results;
    }

    let last = data.len() - pattern.len();
    let Some((anchor, anchor_byte)) = anchor_of(pattern) else {
        results.extend(0..=last);
        return results;
    };

    let upper = last + anchor;
    let mut from = anchor;
    while from <= upper {
        let Some(rel) = memchr(anchor_byte, &data[from..=upper]) else {
            break;
        };
        let pos = from + rel;
        let start = pos - anchor;
        if matches_at(data, start, pattern) {
            results.push(start);
        }
        from = pos + 1;
    }

    results
}

/// Absolute address of the first match inside a loaded module, or `None`
/// when the signature does not occur.
pub fn scan_module<M: ModuleMemory>(module: &M, pattern: &[Option<u8>]) -> Option<u64> {
    find_pattern(module.view(), pattern).map(|pos| module.base() + pos as u64)
}

fn anchor_of(pattern: &[Option<u8>]) -> Option<(usize, u8)> {
    pattern
        .iter()
        .enumerate()
        .find_map(|(i, b)| b.map(|value| (i, value)))
}

fn matches_at(data: &[u8], at: usize, pattern: &[Option<u8>]) -> bool {
    data[at..at + pattern.len()]
        .iter()
        .zip(pattern)
        .all(|(byte, expected)| expected.is_none_or(|value| *byte == value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::MockModule;
    use crate::signature::parse_pattern;

    #[test]
    fn test_find_pattern_exact() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let pattern = parse_pattern("02 03").unwrap();
        assert_eq!(find_pattern(&data, &pattern), Some(1));
    }

    #[test]
    fn test_find_pattern_with_wildcard() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let pattern = parse_pattern("02 ?? 04").unwrap();
        assert_eq!(find_pattern(&data, &pattern), Some(1));
    }

    #[test]
    fn test_find_pattern_leading_wildcard() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let pattern = parse_pattern("?? 03").unwrap();
        assert_eq!(find_pattern(&data, &pattern), Some(1));
    }

    #[test]
    fn test_find_pattern_at_end() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let pattern = parse_pattern("03 04").unwrap();
        assert_eq!(find_pattern(&data, &pattern), Some(2));
    }

    #[test]
    fn test_find_pattern_absent() {
        let data = [0x01, 0x02, 0x03];
        let pattern = parse_pattern("02 04").unwrap();
        assert_eq!(find_pattern(&data, &pattern), None);
    }

    #[test]
    fn test_find_pattern_longer_than_data() {
        let data = [0x01];
        let pattern = parse_pattern("01 02").unwrap();
        assert_eq!(find_pattern(&data, &pattern), None);
    }

    #[test]
    fn test_find_pattern_all_wildcards() {
        let data = [0x01, 0x02];
        let pattern = parse_pattern("?? ??").unwrap();
        assert_eq!(find_pattern(&data, &pattern), Some(0));
    }

    #[test]
    fn test_find_all_patterns_overlapping() {
        let data = [0xAA, 0xAA, 0xAA, 0x00, 0xAA, 0xAA];
        let pattern = parse_pattern("AA AA").unwrap();
        assert_eq!(find_all_patterns(&data, &pattern), vec![0, 1, 4]);
    }

    #[test]
    fn test_scan_module_absolute_address() {
        let pattern = parse_pattern("DE AD BE EF").unwrap();
        let module = MockModule::with_pattern_at(
            0x0040_0000,
            0x1000,
            0x123,
            &[0xDE, 0xAD, 0xBE, 0xEF],
        );
        assert_eq!(scan_module(&module, &pattern), Some(0x0040_0123));
    }

    #[test]
    fn test_scan_module_no_match() {
        let pattern = parse_pattern("DE AD BE EF").unwrap();
        let module = MockModule::new(0x0040_0000, vec![0u8; 0x1000]);
        assert_eq!(scan_module(&module, &pattern), None);
    }
}
