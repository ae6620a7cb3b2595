//! Mock module memory for tests.

use super::ModuleMemory;

pub struct MockModule {
    base: u64,
    bytes: Vec<u8>,
}

impl MockModule {
    pub fn new(base: u64, bytes: Vec<u8>) -> Self {
        Self { base, bytes }
    }

    /// Zero-filled image of `size` bytes with `pattern` placed at `offset`.
    pub fn with_pattern_at(base: u64, size: usize, offset: usize, pattern: &[u8]) -> Self {
        let mut bytes = vec![0u8; size];
        bytes[offset..offset + pattern.len()].copy_from_slice(pattern);
        Self { base, bytes }
    }

    /// Place another pattern into an existing image.
    pub fn place(&mut self, offset: usize, pattern: &[u8]) {
        self.bytes[offset..offset + pattern.len()].copy_from_slice(pattern);
    }
}

impl ModuleMemory for MockModule {
    fn base(&self) -> u64 {
        self.base
    }

    fn view(&self) -> &[u8] {
        &self.bytes
    }
}
