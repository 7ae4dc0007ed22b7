//! StringBuffer: a growable, terminator-delimited byte buffer.
//!
//! The buffer owns a single allocation of `capacity + 1` bytes. The last
//! byte is a terminator that is always zero, so the logical content (the run
//! of bytes from the view offset up to the first zero) is always bounded.
//!
//! Capacity and content length are tracked separately: `capacity` is the
//! size of the allocation, while the content length is found by scanning
//! for the terminator. Left-trimming only advances the view offset; growth,
//! rebasing and compaction move the content back to the start of the
//! allocation.

use super::config::BufferConfig;
use crate::error::{BufferError, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// Length of `bytes` up to, but not including, the first zero byte.
#[inline]
pub(crate) fn terminated_len(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

/// Allocate `capacity + 1` zeroed bytes without aborting on failure.
fn zeroed(capacity: usize) -> Result<Vec<u8>> {
    let failure = BufferError::AllocationFailure {
        requested: capacity,
    };
    let size = capacity.checked_add(1).ok_or_else(|| failure.clone())?;
    let mut alloc = Vec::new();
    if alloc.try_reserve_exact(size).is_err() {
        warn!(requested = capacity, "buffer allocation failed");
        return Err(failure);
    }
    alloc.resize(size, 0);
    Ok(alloc)
}

/// Resolve a slice end against a content length.
///
/// Non-negative ends are clamped to `len`. Negative ends count back from
/// the end using one's complement: `-1` is `len`, `-(k + 1)` is `len - k`.
/// The result may be negative when `k > len`.
fn resolve_end(len: usize, to: isize) -> isize {
    let len = isize::try_from(len).unwrap_or(isize::MAX);
    if to < 0 {
        len - !to
    } else {
        to.min(len)
    }
}

/// How a tail reservation changed the buffer.
pub(super) enum Reservation {
    /// Room was already there.
    InPlace,
    /// Content moved to the front; `view` is where it started.
    Rebased { view: usize },
    /// A new allocation replaced `alloc`, which started at `view`.
    Grown { alloc: Vec<u8>, view: usize },
}

/// A growable byte buffer with a movable content view.
///
/// All constructors copy their input. Input byte sequences are treated as
/// terminator-delimited: anything from the first zero byte on is ignored.
#[derive(Clone)]
pub struct StringBuffer {
    /// Owned storage; `alloc.len() == capacity + 1` and the last byte is zero.
    pub(super) alloc: Vec<u8>,
    /// Offset of the first content byte within `alloc`.
    pub(super) view: usize,
    /// Sizing rules, inherited by slices.
    config: BufferConfig,
}

impl StringBuffer {
    /// Create an empty buffer with the default capacity (64).
    pub fn new() -> Result<Self> {
        Self::with_config(BufferConfig::default())
    }

    /// Create an empty buffer able to hold `capacity` bytes without growing.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_and_config(capacity, BufferConfig::default())
    }

    /// Create an empty buffer sized and grown according to `config`.
    pub fn with_config(config: BufferConfig) -> Result<Self> {
        Self::with_capacity_and_config(config.default_capacity(), config)
    }

    /// Create an empty buffer with an explicit capacity and configuration.
    pub fn with_capacity_and_config(capacity: usize, config: BufferConfig) -> Result<Self> {
        Ok(Self {
            alloc: zeroed(capacity)?,
            view: 0,
            config,
        })
    }

    /// Create a buffer holding a copy of `bytes`, sized exactly to fit.
    ///
    /// Fails with [`BufferError::InvalidArgument`] if `bytes` is empty.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let len = terminated_len(bytes);
        if len == 0 {
            return Err(BufferError::invalid("seed bytes must not be empty"));
        }
        let mut buffer = Self::with_capacity(len)?;
        buffer.alloc[..len].copy_from_slice(&bytes[..len]);
        Ok(buffer)
    }

    /// Create a buffer from the first `len` bytes of `bytes`.
    pub fn from_bytes_len(bytes: &[u8], len: usize) -> Result<Self> {
        let seed = bytes
            .get(..len)
            .ok_or(BufferError::invalid("seed length exceeds input"))?;
        Self::from_bytes(seed)
    }

    // =========================================================================
    // Size queries
    // =========================================================================

    /// Usable bytes in the allocation, excluding the terminator slot.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.alloc.len() - 1
    }

    /// Content length, found by scanning from the view to the terminator.
    #[inline]
    pub fn len(&self) -> usize {
        terminated_len(&self.alloc[self.view..])
    }

    /// Check if the content is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alloc[self.view] == 0
    }

    /// Offset of the content start within the allocation.
    ///
    /// Non-zero only after a left trim.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.view
    }

    /// Unused bytes after the content.
    ///
    /// Growth triggers once the content would reach capacity, so appending
    /// exactly this many bytes may still reallocate; shorter appends never do.
    pub fn spare_capacity(&self) -> usize {
        self.capacity() - self.view - self.len()
    }

    /// The sizing configuration of this buffer.
    #[inline]
    pub const fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// The logical content.
    pub fn as_bytes(&self) -> &[u8] {
        let len = self.len();
        &self.alloc[self.view..self.view + len]
    }

    /// The logical content followed by its zero terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        let len = self.len();
        &self.alloc[self.view..=self.view + len]
    }

    // =========================================================================
    // Growth
    // =========================================================================

    /// Make room for `additional` bytes after the content.
    ///
    /// Returns the current content length. On success the bytes at
    /// `view + len .. view + len + additional` are writable and the slot
    /// after them lies within the allocation.
    pub(super) fn reserve_tail(&mut self, additional: usize) -> Result<usize> {
        self.reserve_tail_undoable(additional).map(|(len, _)| len)
    }

    /// Like [`reserve_tail`](Self::reserve_tail), also returning what is
    /// needed to put the buffer back if the caller's write fails.
    pub(super) fn reserve_tail_undoable(&mut self, additional: usize) -> Result<(usize, Reservation)> {
        let len = self.len();
        let required = len
            .checked_add(additional)
            .ok_or(BufferError::AllocationFailure {
                requested: usize::MAX,
            })?;
        let capacity = self.capacity();
        let reservation = if required >= capacity {
            let view = self.view;
            let alloc = self.grow(len, required)?;
            Reservation::Grown { alloc, view }
        } else if self.view + required > capacity {
            let view = self.view;
            self.rebase(len);
            Reservation::Rebased { view }
        } else {
            Reservation::InPlace
        };
        Ok((len, reservation))
    }

    /// Restore the state from before [`reserve_tail_undoable`](Self::reserve_tail_undoable)
    /// returned `reservation`, dropping anything written after the content.
    pub(super) fn undo_reserve(&mut self, len: usize, reservation: Reservation) {
        match reservation {
            Reservation::InPlace => {
                self.alloc[self.view + len] = 0;
            }
            Reservation::Rebased { view } => {
                self.alloc.copy_within(0..len, view);
                self.alloc[view + len] = 0;
                self.view = view;
            }
            Reservation::Grown { alloc, view } => {
                self.alloc = alloc;
                self.view = view;
            }
        }
        trace!(view = self.view, len, "buffer reservation undone");
    }

    /// Replace the allocation with one rounded up to the growth quantum.
    ///
    /// Returns the previous allocation.
    fn grow(&mut self, len: usize, required: usize) -> Result<Vec<u8>> {
        let capacity = self
            .config
            .round_up(required)
            .ok_or(BufferError::AllocationFailure {
                requested: required,
            })?;
        let mut alloc = zeroed(capacity)?;
        alloc[..len].copy_from_slice(&self.alloc[self.view..self.view + len]);
        trace!(old = self.capacity(), new = capacity, "buffer grown");
        self.view = 0;
        Ok(std::mem::replace(&mut self.alloc, alloc))
    }

    /// Move the content to the start of the existing allocation.
    fn rebase(&mut self, len: usize) {
        trace!(view = self.view, len, "buffer rebased");
        self.alloc.copy_within(self.view..self.view + len, 0);
        self.alloc[len] = 0;
        self.view = 0;
    }

    // =========================================================================
    // Append / Prepend
    // =========================================================================

    /// Append `bytes` after the content, growing if needed.
    ///
    /// Fails with [`BufferError::InvalidArgument`] if `bytes` is empty.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.append_n(bytes, bytes.len())
    }

    /// Append at most the first `n` bytes of `bytes`.
    pub fn append_n(&mut self, bytes: &[u8], n: usize) -> Result<()> {
        let bytes = &bytes[..n.min(bytes.len())];
        let add = terminated_len(bytes);
        if add == 0 {
            return Err(BufferError::invalid("appended bytes must not be empty"));
        }
        let len = self.reserve_tail(add)?;
        let start = self.view + len;
        self.alloc[start..start + add].copy_from_slice(&bytes[..add]);
        self.alloc[start + add] = 0;
        Ok(())
    }

    /// Insert `bytes` in front of the content, growing if needed.
    ///
    /// Fails with [`BufferError::InvalidArgument`] if `bytes` is empty.
    pub fn prepend(&mut self, bytes: &[u8]) -> Result<()> {
        let add = terminated_len(bytes);
        if add == 0 {
            return Err(BufferError::invalid("prepended bytes must not be empty"));
        }
        let len = self.reserve_tail(add)?;
        let view = self.view;
        // Shift content and terminator together.
        self.alloc.copy_within(view..=view + len, view + add);
        self.alloc[view..view + add].copy_from_slice(&bytes[..add]);
        Ok(())
    }

    // =========================================================================
    // Equality, search, slicing
    // =========================================================================

    /// Compare two possibly absent buffers by content.
    ///
    /// Two absent buffers are equal; an absent and a present one are not.
    pub fn equals(a: Option<&Self>, b: Option<&Self>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => a.as_bytes() == b.as_bytes(),
            _ => false,
        }
    }

    /// Offset of the first occurrence of `needle` in the content.
    ///
    /// Returns [`BufferError::NotFound`] when there is no match and
    /// [`BufferError::InvalidArgument`] for an empty needle.
    pub fn find(&self, needle: &[u8]) -> Result<usize> {
        let needle = &needle[..terminated_len(needle)];
        if needle.is_empty() {
            return Err(BufferError::invalid("needle must not be empty"));
        }
        self.as_bytes()
            .windows(needle.len())
            .position(|window| window == needle)
            .ok_or(BufferError::NotFound)
    }

    /// Copy `content[from..to]` into a new, exactly sized buffer.
    ///
    /// A non-negative `to` is an exclusive end and is clamped to the content
    /// length. A negative `to` counts from the end by one's complement:
    /// the effective end is `len - !to`, so `-1` means the end of content
    /// and `-3` drops the last two bytes.
    ///
    /// Fails with [`BufferError::Range`] if the effective end precedes
    /// `from`. The source buffer is never modified.
    pub fn slice(&self, from: usize, to: isize) -> Result<Self> {
        let content = self.as_bytes();
        let end = resolve_end(content.len(), to);
        let range_error = BufferError::Range {
            from,
            to: end,
            len: content.len(),
        };
        let end = usize::try_from(end).map_err(|_| range_error.clone())?;
        let piece = content.get(from..end).ok_or(range_error)?;

        let mut out = Self::with_capacity_and_config(piece.len(), self.config)?;
        out.alloc[..piece.len()].copy_from_slice(piece);
        Ok(out)
    }

    // =========================================================================
    // Fill, clear, compact
    // =========================================================================

    /// Overwrite the whole capacity, not just the content, with `byte`.
    ///
    /// The terminator slot and the view offset are left alone.
    pub fn fill(&mut self, byte: u8) {
        let capacity = self.capacity();
        self.alloc[..capacity].fill(byte);
    }

    /// Zero the whole capacity.
    pub fn clear(&mut self) {
        self.fill(0);
    }

    /// Shrink the allocation to fit the content exactly.
    ///
    /// Returns the number of bytes reclaimed. On allocation failure the
    /// buffer is unchanged.
    pub fn compact(&mut self) -> Result<usize> {
        let len = self.len();
        let old = self.capacity();
        let mut alloc = zeroed(len)?;
        alloc[..len].copy_from_slice(&self.alloc[self.view..self.view + len]);
        self.alloc = alloc;
        self.view = 0;

        let reclaimed = old - len;
        debug!(old, new = len, reclaimed, "buffer compacted");
        Ok(reclaimed)
    }
}

impl PartialEq for StringBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for StringBuffer {}

impl Hash for StringBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl AsRef<[u8]> for StringBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<&[u8]> for StringBuffer {
    type Error = BufferError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&str> for StringBuffer {
    type Error = BufferError;

    fn try_from(s: &str) -> Result<Self> {
        Self::from_bytes(s.as_bytes())
    }
}

impl FromStr for StringBuffer {
    type Err = BufferError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bytes(s.as_bytes())
    }
}

impl fmt::Debug for StringBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringBuffer")
            .field("capacity", &self.capacity())
            .field("offset", &self.view)
            .field("len", &self.len())
            .field("content", &format_args!("\"{}\"", self.as_bytes().escape_ascii()))
            .finish()
    }
}
