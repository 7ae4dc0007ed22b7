//! Buffer module: the growable string buffer and its operations.
//!
//! This module contains:
//! - [`StringBuffer`]: Owned storage, growth, append/prepend, search, slicing
//! - [`BufferConfig`]: Default capacity and growth quantum
//! - [`Trim`] and [`is_delimiter`]: Leading/trailing delimiter removal
//! - Formatted appends via [`StringBuffer::append_fmt`] and [`appendf!`](crate::appendf)

mod config;
mod format;
mod string_buffer;
mod trim;

pub use config::{BufferConfig, DEFAULT_CAPACITY, GROWTH_QUANTUM};
pub use string_buffer::StringBuffer;
pub use trim::{is_delimiter, Trim};
