use std::{
    ops::{Range, RangeBounds},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::block::AlignedBlock;

/// A shared, mutable, fixed-length byte region.
///
/// Cloning a `SharedBytes` produces another handle to the *same* bytes: writes
/// made through any handle are immediately visible through every other one.
/// This is the unit a buffer view indexes into and the unit a pool carves
/// slices from.
///
/// Access is scoped: [`SharedBytes::read`] and [`SharedBytes::write`] run a
/// closure while the region is locked. Callers must not acquire another
/// region's lock from inside a `write` closure.
///
/// # Deadlocks
///
/// The lock is not reentrant. Writing to the same region from inside a
/// `read` or `write` closure, through this handle or any clone of it, blocks
/// forever. Snapshot with [`SharedBytes::to_vec`] first, then write.
#[derive(Clone)]
pub struct SharedBytes {
    inner: Arc<RwLock<AlignedBlock>>,
    len: usize,
}

impl SharedBytes {
    /// Allocates a region of `len` zero bytes.
    pub fn zeroed(len: usize) -> SharedBytes {
        Self::from_block(AlignedBlock::zeroed(len))
    }

    /// Allocates a region holding a copy of `data`.
    pub fn copy_from_slice(data: &[u8]) -> SharedBytes {
        Self::from_block(AlignedBlock::copy_from_slice(data))
    }

    pub fn from_block(block: AlignedBlock) -> SharedBytes {
        SharedBytes {
            len: block.len(),
            inner: Arc::new(RwLock::new(block)),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if both handles refer to the same region.
    #[inline]
    pub fn ptr_eq(&self, other: &SharedBytes) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live handles to this region.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Runs `f` over the bytes in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    ///
    /// # Deadlocks
    ///
    /// `f` must not write to this region through any handle.
    pub fn read<R>(&self, range: impl RangeBounds<usize>, f: impl FnOnce(&[u8]) -> R) -> R {
        let range = self.verify_range(range);
        let guard = self.lock_read();
        f(&guard.as_slice()[range])
    }

    /// Runs `f` over the mutable bytes in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn write<R>(&self, range: impl RangeBounds<usize>, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let range = self.verify_range(range);
        let mut guard = self.lock_write();
        f(&mut guard.as_mut_slice()[range])
    }

    /// Reads the byte at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        self.read(index..index + 1, |b| b[0])
    }

    /// Stores `value` at `index`.
    #[inline]
    pub fn set(&self, index: usize, value: u8) {
        self.write(index..index + 1, |b| b[0] = value)
    }

    /// Copies the bytes in `range` out of the region.
    pub fn to_vec(&self, range: impl RangeBounds<usize>) -> Vec<u8> {
        self.read(range, |b| b.to_vec())
    }

    /// Copies `len` bytes from `src` to `dst` within this region, with
    /// `memmove` semantics for overlapping ranges.
    pub fn copy_within(&self, src: usize, dst: usize, len: usize) {
        self.verify_range(src..src + len);
        self.verify_range(dst..dst + len);
        let mut guard = self.lock_write();
        guard.as_mut_slice().copy_within(src..src + len, dst);
    }
}

impl SharedBytes {
    fn lock_read(&self) -> RwLockReadGuard<'_, AlignedBlock> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_write(&self) -> RwLockWriteGuard<'_, AlignedBlock> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolves `range` against the region length.
    ///
    /// # Panics
    ///
    /// Panics if the start is greater than the end or the end exceeds the region.
    fn verify_range(&self, range: impl RangeBounds<usize>) -> Range<usize> {
        use core::ops::Bound;

        let start = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n.checked_add(1).expect("out of range"),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&n) => n.checked_add(1).expect("out of range"),
            Bound::Excluded(&n) => n,
            Bound::Unbounded => self.len,
        };

        assert!(
            start <= end,
            "range start must not be greater than end: {start:?} <= {end:?}",
        );
        assert!(
            end <= self.len,
            "range end out of bounds: {end:?} <= {:?}",
            self.len
        );
        start..end
    }
}

impl Default for SharedBytes {
    fn default() -> Self {
        SharedBytes::zeroed(0)
    }
}

impl From<Vec<u8>> for SharedBytes {
    fn from(data: Vec<u8>) -> SharedBytes {
        SharedBytes::copy_from_slice(&data)
    }
}

impl From<&[u8]> for SharedBytes {
    fn from(data: &[u8]) -> SharedBytes {
        SharedBytes::copy_from_slice(data)
    }
}

impl std::fmt::Debug for SharedBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedBytes")
            .field("len", &self.len)
            .field("handles", &self.handle_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_zeroed() {
        let region = SharedBytes::zeroed(16);
        assert_eq!(region.len(), 16);
        assert_eq!(region.to_vec(..), vec![0u8; 16]);
    }

    #[test]
    fn test_shared_clone_aliases() {
        let a = SharedBytes::copy_from_slice(&[1, 2, 3, 4]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.handle_count(), 2);

        b.set(2, 9);
        assert_eq!(a.get(2), 9);
        a.write(0..2, |bytes| bytes.copy_from_slice(&[7, 8]));
        assert_eq!(b.to_vec(..), vec![7, 8, 9, 4]);

        let c = SharedBytes::copy_from_slice(&[7, 8, 9, 4]);
        assert!(!a.ptr_eq(&c));
    }

    #[test]
    fn test_shared_read_range() {
        let region = SharedBytes::from(vec![10u8, 20, 30, 40, 50]);
        assert_eq!(region.read(1..4, |b| b.iter().map(|&x| x as u32).sum::<u32>()), 90);
        assert_eq!(region.to_vec(3..), vec![40, 50]);
        assert_eq!(region.to_vec(5..5), Vec::<u8>::new());
    }

    #[test]
    fn test_shared_copy_within_overlapping() {
        let region = SharedBytes::from(&[1u8, 2, 3, 4, 5, 6][..]);
        region.copy_within(0, 2, 4);
        assert_eq!(region.to_vec(..), vec![1, 2, 1, 2, 3, 4]);
        region.copy_within(2, 0, 4);
        assert_eq!(region.to_vec(..), vec![1, 2, 3, 4, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "range end out of bounds")]
    fn test_shared_out_of_bounds() {
        let region = SharedBytes::zeroed(3);
        region.to_vec(1..4);
    }

    #[test]
    fn test_shared_across_threads() {
        let region = SharedBytes::zeroed(64);
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let region = region.clone();
                std::thread::spawn(move || {
                    for i in 0..16 {
                        region.set(t * 16 + i, t as u8 + 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let bytes = region.to_vec(..);
        for (i, b) in bytes.iter().enumerate() {
            assert_eq!(*b as usize, i / 16 + 1);
        }
    }
}
