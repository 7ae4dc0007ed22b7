//! Sizing configuration for string buffers.

use crate::error::{BufferError, Result};

/// Capacity of a buffer created without an explicit size.
pub const DEFAULT_CAPACITY: usize = 64;

/// Granularity of capacity growth. Must be a power of two.
pub const GROWTH_QUANTUM: usize = 1024;

/// Configuration for buffer sizing.
///
/// Fields are private so the growth quantum is always a power of two; build
/// one with [`BufferConfig::new`] or start from [`BufferConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    default_capacity: usize,
    growth_quantum: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_CAPACITY,
            growth_quantum: GROWTH_QUANTUM,
        }
    }
}

impl BufferConfig {
    /// Create a validated configuration.
    ///
    /// Fails with [`BufferError::InvalidArgument`] unless `growth_quantum`
    /// is a non-zero power of two.
    pub fn new(default_capacity: usize, growth_quantum: usize) -> Result<Self> {
        if !growth_quantum.is_power_of_two() {
            return Err(BufferError::invalid("growth quantum must be a power of two"));
        }
        Ok(Self {
            default_capacity,
            growth_quantum,
        })
    }

    /// Capacity used by [`StringBuffer::with_config`](super::StringBuffer::with_config).
    #[inline]
    pub const fn default_capacity(&self) -> usize {
        self.default_capacity
    }

    /// Growth rounds the requested length up to a multiple of this.
    #[inline]
    pub const fn growth_quantum(&self) -> usize {
        self.growth_quantum
    }

    /// Replace the default capacity.
    #[must_use]
    pub const fn with_default_capacity(mut self, default_capacity: usize) -> Self {
        self.default_capacity = default_capacity;
        self
    }

    /// Replace the growth quantum, validating it like [`BufferConfig::new`].
    pub fn with_growth_quantum(self, growth_quantum: usize) -> Result<Self> {
        Self::new(self.default_capacity, growth_quantum)
    }

    /// Round `requested` up to the nearest multiple of the growth quantum.
    ///
    /// Returns `None` if the rounded value does not fit in `usize`.
    #[inline]
    pub const fn round_up(&self, requested: usize) -> Option<usize> {
        let mask = self.growth_quantum - 1;
        match requested.checked_add(mask) {
            Some(n) => Some(n & !mask),
            None => None,
        }
    }
}
