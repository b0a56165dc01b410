//! Backing storage for membuf buffers: fixed-length aligned byte blocks and
//! a shared, lock-guarded region handle that any number of views may alias.

pub mod align;
pub mod block;
pub mod shared;

pub use block::AlignedBlock;
pub use shared::SharedBytes;
