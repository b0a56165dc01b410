use std::ops::{Deref, DerefMut};

/// A fixed-length, zero-initialized byte block whose first byte is aligned
/// to [`AlignedBlock::ALIGNMENT`].
///
/// The length is set at construction and never changes, so the aligned start
/// position inside the underlying allocation is computed once and stays valid.
pub struct AlignedBlock {
    /// Backing allocation, includes leading padding.
    inner: Vec<u8>,
    /// Index of the first aligned byte within `inner`.
    start: usize,
    len: usize,
}

impl AlignedBlock {
    /// Base alignment of every block, in bytes.
    pub const ALIGNMENT: usize = 64;

    /// Creates an empty block.
    pub fn new() -> AlignedBlock {
        AlignedBlock {
            inner: Vec::new(),
            start: 0,
            len: 0,
        }
    }

    /// Creates a block of `len` zero bytes.
    pub fn zeroed(len: usize) -> AlignedBlock {
        if len == 0 {
            return AlignedBlock::new();
        }
        let inner = vec![0u8; len + Self::ALIGNMENT];
        let start = match inner.as_ptr().align_offset(Self::ALIGNMENT) {
            offset if offset < Self::ALIGNMENT => offset,
            _ => 0,
        };
        AlignedBlock { inner, start, len }
    }

    /// Creates a block holding a copy of `data`.
    pub fn copy_from_slice(data: &[u8]) -> AlignedBlock {
        let mut block = AlignedBlock::zeroed(data.len());
        block.as_mut_slice().copy_from_slice(data);
        block
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner[self.start..self.start + self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.inner[self.start..self.start + self.len]
    }
}

impl Deref for AlignedBlock {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl DerefMut for AlignedBlock {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl Clone for AlignedBlock {
    fn clone(&self) -> AlignedBlock {
        AlignedBlock::copy_from_slice(self.as_slice())
    }
}

impl Default for AlignedBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AlignedBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBlock")
            .field("len", &self.len)
            .field("internal_offset", &self.start)
            .field("internal_cap", &self.inner.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_aligned(block: &AlignedBlock) -> bool {
        block.as_ptr() as usize % AlignedBlock::ALIGNMENT == 0
    }

    #[test]
    fn test_block_zeroed() {
        let block = AlignedBlock::zeroed(100);
        assert_eq!(block.len(), 100);
        assert!(block.iter().all(|&b| b == 0));
        assert!(is_aligned(&block));
    }

    #[test]
    fn test_block_empty() {
        let block = AlignedBlock::zeroed(0);
        assert!(block.is_empty());
        assert_eq!(block.as_slice(), &[] as &[u8]);
        assert_eq!(AlignedBlock::default().len(), 0);
    }

    #[test]
    fn test_block_copy_and_clone() {
        let data: Vec<u8> = (0..=255).collect();
        let block = AlignedBlock::copy_from_slice(&data);
        assert_eq!(block.as_slice(), data.as_slice());

        let mut cloned = block.clone();
        cloned[0] = 0xAA;
        assert_eq!(block[0], 0);
        assert_eq!(cloned[0], 0xAA);
        assert!(is_aligned(&cloned));
    }

    #[test]
    fn test_block_random_sizes_are_aligned() {
        for _ in 0..50 {
            let len = fastrand::usize(1..5000);
            let block = AlignedBlock::zeroed(len);
            assert_eq!(block.len(), len);
            assert!(is_aligned(&block));
        }
    }
}
