use serde::{Deserialize, Serialize};

/// Capacity of a pool slab, in bytes.
pub const DEFAULT_POOL_SIZE: usize = 8 * 1024;

/// Boundary the pool cursor is rounded up to after each slice.
pub const DEFAULT_POOL_ALIGNMENT: usize = 8;

/// Number of bytes rendered by the diagnostic formatter before truncating.
pub const INSPECT_MAX_BYTES: usize = 50;

/// Largest slab a pool may be configured with.
const MAX_POOL_SIZE: usize = 64 * 1024 * 1024;

/// Configuration of a [`BufferPool`](crate::pool::BufferPool).
///
/// Requests smaller than half of `pool_size` are carved out of a shared slab;
/// larger ones get standalone storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Slab capacity in bytes.
    pub pool_size: usize,

    /// Cursor alignment in bytes, a power of two.
    pub alignment: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            pool_size: DEFAULT_POOL_SIZE,
            alignment: DEFAULT_POOL_ALIGNMENT,
        }
    }
}

impl PoolConfig {
    /// Creates a validated configuration.
    pub fn with_all_parameters(pool_size: usize, alignment: usize) -> Result<Self, String> {
        let config = PoolConfig {
            pool_size,
            alignment,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.alignment.is_power_of_two() || self.alignment > 64 {
            return Err(format!(
                "alignment must be a power of two no greater than 64, got {}",
                self.alignment
            ));
        }
        if self.pool_size < self.alignment || self.pool_size > MAX_POOL_SIZE {
            return Err(format!(
                "pool_size must be between {} and {MAX_POOL_SIZE}, got {}",
                self.alignment, self.pool_size
            ));
        }
        if self.pool_size % self.alignment != 0 {
            return Err(format!(
                "pool_size {} is not a multiple of alignment {}",
                self.pool_size, self.alignment
            ));
        }
        Ok(())
    }
}

/// Options of the diagnostic hex dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectOptions {
    /// Number of leading bytes rendered; the rest is summarized as a count.
    pub max_bytes: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        InspectOptions {
            max_bytes: INSPECT_MAX_BYTES,
        }
    }
}
