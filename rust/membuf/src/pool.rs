//! Slab allocator for small buffers.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use membuf_bytes::{SharedBytes, align::align_up};
use membuf_common::{Result, result::verify_size};

use crate::{buffer::Buffer, config::PoolConfig};

/// Bump-pointer allocator that carves small buffers out of a shared slab.
///
/// A request of `size` bytes is served as follows:
/// - `size >= pool_size / 2`: standalone storage of exactly `size` bytes;
/// - `size` does not fit in the rest of the current slab: a fresh slab
///   replaces it (the remainder of the old one is abandoned) and the
///   slice is taken from its start;
/// - otherwise the slice `[cursor, cursor + size)` is handed out and the
///   cursor advances to the next multiple of the configured alignment.
///
/// Slices never overlap and slab memory is never reused, so a pooled buffer
/// stays valid for as long as any view references it. Slabs are zero-filled
/// on creation.
pub struct BufferPool {
    config: PoolConfig,
    state: Mutex<PoolState>,
}

struct PoolState {
    slab: Option<SharedBytes>,
    offset: usize,
    stats: PoolStats,
}

/// Allocation counters of a [`BufferPool`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of slabs created so far.
    pub slabs_created: usize,
    /// Number of requests served from a slab.
    pub pooled_allocations: usize,
    /// Number of requests that bypassed the pool.
    pub standalone_allocations: usize,
    /// Current cursor within the active slab.
    pub offset: usize,
    /// Capacity of the active slab, zero before the first pooled request.
    pub capacity: usize,
}

impl BufferPool {
    /// Creates a pool with the default configuration (8 KiB slabs, 8-byte
    /// alignment). No slab is allocated until the first pooled request.
    pub fn new() -> BufferPool {
        BufferPool {
            config: PoolConfig::default(),
            state: Mutex::new(PoolState {
                slab: None,
                offset: 0,
                stats: PoolStats::default(),
            }),
        }
    }

    pub fn with_config(config: PoolConfig) -> std::result::Result<BufferPool, String> {
        config.validate()?;
        let mut pool = BufferPool::new();
        pool.config = config;
        Ok(pool)
    }

    /// The process-wide pool used by the free allocation functions.
    pub fn global() -> &'static BufferPool {
        static GLOBAL_POOL: OnceLock<BufferPool> = OnceLock::new();
        GLOBAL_POOL.get_or_init(BufferPool::new)
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns a buffer of exactly `size` bytes, sliced from the current slab
    /// when it is small enough.
    ///
    /// Fails with a size error when `size >= 2^32`.
    pub fn alloc(&self, size: usize) -> Result<Buffer> {
        let size = verify_size(size as i128, "size")?;
        let capacity = self.config.pool_size;

        if size >= capacity / 2 {
            self.lock().stats.standalone_allocations += 1;
            log::trace!("standalone allocation of {size} bytes");
            return Ok(Buffer::zeroed(size));
        }

        let mut state = self.lock();
        let slab = match &state.slab {
            Some(slab) if size <= capacity - state.offset => slab.clone(),
            _ => {
                let slab = SharedBytes::zeroed(capacity);
                state.slab = Some(slab.clone());
                state.offset = 0;
                state.stats.slabs_created += 1;
                state.stats.capacity = capacity;
                log::debug!(
                    "created pool slab #{} of {capacity} bytes",
                    state.stats.slabs_created
                );
                slab
            }
        };

        let offset = state.offset;
        state.offset = align_up(offset + size, self.config.alignment).min(capacity);
        state.stats.offset = state.offset;
        state.stats.pooled_allocations += 1;
        Ok(Buffer::from_pool_slice(slab, offset, size))
    }

    pub fn stats(&self) -> PoolStats {
        self.lock().stats
    }

    fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        BufferPool::new()
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}
