//! # strbuf
//!
//! A growable, terminator-delimited byte buffer.
//!
//! strbuf keeps capacity and logical length apart: the buffer owns one
//! allocation whose last byte is always a zero terminator, and the content is
//! whatever lies between a movable view offset and the first zero.
//!
//! ## Core Concepts
//!
//! - **Quantum growth**: capacity grows to the next multiple of 1024 bytes
//! - **Movable view**: left-trimming advances an offset instead of moving bytes
//! - **Atomic failure**: a failed allocation leaves the buffer untouched
//! - **Compaction**: shrink the allocation to fit the content on demand
//!
//! ## Example
//!
//! ```rust
//! use strbuf::{appendf, StringBuffer};
//!
//! # fn main() -> strbuf::Result<()> {
//! let mut buf = StringBuffer::with_capacity(10)?;
//! buf.append(b"  Hello")?;
//! appendf!(buf, ", {}!  ", "tobi")?;
//! buf.trim(None);
//! assert_eq!(buf.as_bytes(), b"Hello, tobi!");
//!
//! let name = buf.slice(7, -2)?;
//! assert_eq!(name.as_bytes(), b"tobi");
//!
//! let reclaimed = buf.compact()?;
//! assert_eq!(reclaimed, 1024 - 12);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod error;
pub mod ffi;

// Re-exports for convenience
pub use buffer::{is_delimiter, BufferConfig, StringBuffer, Trim, DEFAULT_CAPACITY, GROWTH_QUANTUM};
pub use error::{BufferError, Result};
