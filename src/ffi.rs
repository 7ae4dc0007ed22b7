//! C Foreign Function Interface (FFI) for strbuf.
//!
//! This module exposes [`StringBuffer`] to C as an opaque handle. All
//! functions are `extern "C"` with stable ABI.
//!
//! # Safety
//!
//! Handles must come from one of the `string_buffer_new*` constructors (or
//! [`string_buffer_slice`]) and must not be used after
//! [`string_buffer_free`]. String arguments must be NUL-terminated. Null
//! handles and null strings are accepted everywhere and reported as
//! failures.
//!
//! # Return conventions
//!
//! - Constructors return NULL on failure.
//! - Mutators return `0` on success and `-1` on failure.
//! - Queries on a NULL handle return `0`.
//!
//! # Example (C)
//!
//! ```c
//! #include "strbuf.h"
//!
//! int main() {
//!     StringBufferHandle *buf = string_buffer_new();
//!     if (!buf) return 1;
//!
//!     string_buffer_append(buf, "  Hello");
//!     string_buffer_trim(buf, NULL);
//!     puts(string_buffer_final(buf));
//!
//!     string_buffer_free(buf);
//!     return 0;
//! }
//! ```
//!
//! Formatted appends are not exposed because stable Rust cannot define
//! C-variadic functions; format with `snprintf` and call
//! [`string_buffer_append`].

// FFI modules intentionally use unsafe and no_mangle
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use crate::buffer::StringBuffer;
use crate::error::Result;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::ptr;

// =============================================================================
// Opaque Handle Type
// =============================================================================

/// Opaque handle to a string buffer.
#[derive(Debug)]
pub struct StringBufferHandle(StringBuffer);

// =============================================================================
// Helper Functions
// =============================================================================

fn into_handle(result: Result<StringBuffer>) -> *mut StringBufferHandle {
    match result {
        Ok(buffer) => Box::into_raw(Box::new(StringBufferHandle(buffer))),
        Err(_) => ptr::null_mut(),
    }
}

const fn status(result: &Result<()>) -> c_int {
    if result.is_ok() {
        0
    } else {
        -1
    }
}

/// Borrow a C string's bytes, or `None` for NULL.
unsafe fn c_bytes<'a>(s: *const c_char) -> Option<&'a [u8]> {
    if s.is_null() {
        None
    } else {
        Some(CStr::from_ptr(s).to_bytes())
    }
}

/// Borrow at most `max` bytes of a non-NULL C string, stopping at its NUL.
unsafe fn c_bytes_n<'a>(s: *const c_char, max: usize) -> &'a [u8] {
    let s = s.cast::<u8>();
    let len = (0..max).take_while(|&i| *s.add(i) != 0).count();
    std::slice::from_raw_parts(s, len)
}

// =============================================================================
// Construction and Destruction
// =============================================================================

/// Create an empty buffer with the default capacity.
///
/// Returns NULL on failure.
#[unsafe(no_mangle)]
pub extern "C" fn string_buffer_new() -> *mut StringBufferHandle {
    into_handle(StringBuffer::new())
}

/// Create an empty buffer with capacity `n`.
///
/// Returns NULL on failure.
#[unsafe(no_mangle)]
pub extern "C" fn string_buffer_new_with_size(n: usize) -> *mut StringBufferHandle {
    into_handle(StringBuffer::with_capacity(n))
}

/// Create a buffer holding a copy of `s`.
///
/// Returns NULL if `s` is NULL or empty, or on allocation failure.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_new_with_string(s: *const c_char) -> *mut StringBufferHandle {
    match c_bytes(s) {
        Some(bytes) => into_handle(StringBuffer::from_bytes(bytes)),
        None => ptr::null_mut(),
    }
}

/// Create a buffer from at most the first `len` bytes of `s`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_new_with_string_length(
    s: *const c_char,
    len: usize,
) -> *mut StringBufferHandle {
    if s.is_null() || len == 0 {
        return ptr::null_mut();
    }
    into_handle(StringBuffer::from_bytes(c_bytes_n(s, len)))
}

/// Create a buffer holding a copy of `s`.
///
/// Identical to [`string_buffer_new_with_string`]; every constructor copies.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_new_with_copy(s: *const c_char) -> *mut StringBufferHandle {
    string_buffer_new_with_string(s)
}

/// Destroy a buffer and release its storage.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_free(buf: *mut StringBufferHandle) {
    if !buf.is_null() {
        drop(Box::from_raw(buf));
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Get the buffer capacity.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_size(buf: *const StringBufferHandle) -> usize {
    if buf.is_null() {
        return 0;
    }
    (*buf).0.capacity()
}

/// Get the content length.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_length(buf: *const StringBufferHandle) -> usize {
    if buf.is_null() {
        return 0;
    }
    (*buf).0.len()
}

/// Get a pointer to the NUL-terminated content.
///
/// The pointer is invalidated by any mutating call. Returns NULL for a NULL
/// handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_final(buf: *const StringBufferHandle) -> *const c_char {
    if buf.is_null() {
        return ptr::null();
    }
    (*buf).0.as_bytes_with_nul().as_ptr().cast::<c_char>()
}

/// Compare two buffers by content. Returns 1 if equal, 0 otherwise.
///
/// Two NULL handles compare equal.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_equals(
    a: *const StringBufferHandle,
    b: *const StringBufferHandle,
) -> c_int {
    let a = a.as_ref().map(|handle| &handle.0);
    let b = b.as_ref().map(|handle| &handle.0);
    c_int::from(StringBuffer::equals(a, b))
}

/// Find the offset of `needle` in the content, or -1.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_index(
    buf: *const StringBufferHandle,
    needle: *const c_char,
) -> isize {
    if buf.is_null() {
        return -1;
    }
    let Some(needle) = c_bytes(needle) else {
        return -1;
    };
    (*buf)
        .0
        .find(needle)
        .ok()
        .and_then(|offset| isize::try_from(offset).ok())
        .unwrap_or(-1)
}

// =============================================================================
// Mutation
// =============================================================================

/// Append `s` to the content.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_append(buf: *mut StringBufferHandle, s: *const c_char) -> c_int {
    if buf.is_null() {
        return -1;
    }
    match c_bytes(s) {
        Some(bytes) => status(&(*buf).0.append(bytes)),
        None => -1,
    }
}

/// Append at most `len` bytes of `s` to the content.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_append_n(
    buf: *mut StringBufferHandle,
    s: *const c_char,
    len: usize,
) -> c_int {
    if buf.is_null() || s.is_null() || len == 0 {
        return -1;
    }
    status(&(*buf).0.append_n(c_bytes_n(s, len), len))
}

/// Insert `s` in front of the content.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_prepend(buf: *mut StringBufferHandle, s: *const c_char) -> c_int {
    if buf.is_null() {
        return -1;
    }
    match c_bytes(s) {
        Some(bytes) => status(&(*buf).0.prepend(bytes)),
        None => -1,
    }
}

/// Copy a range of the content into a new buffer.
///
/// A negative `to` counts back from the end: `-1` is the end of content.
/// Returns NULL on a range error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_slice(
    buf: *const StringBufferHandle,
    from: usize,
    to: isize,
) -> *mut StringBufferHandle {
    if buf.is_null() {
        return ptr::null_mut();
    }
    into_handle((*buf).0.slice(from, to))
}

/// Shrink the allocation to fit the content.
///
/// Returns the number of bytes reclaimed, or -1 on failure.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_compact(buf: *mut StringBufferHandle) -> isize {
    if buf.is_null() {
        return -1;
    }
    (*buf)
        .0
        .compact()
        .ok()
        .and_then(|reclaimed| isize::try_from(reclaimed).ok())
        .unwrap_or(-1)
}

/// Overwrite the whole capacity with `c` (truncated to a byte).
#[unsafe(no_mangle)]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub unsafe extern "C" fn string_buffer_fill(buf: *mut StringBufferHandle, c: c_int) {
    if !buf.is_null() {
        (*buf).0.fill(c as u8);
    }
}

/// Zero the whole capacity.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_clear(buf: *mut StringBufferHandle) {
    if !buf.is_null() {
        (*buf).0.clear();
    }
}

/// Trim leading delimiters. `chars` may be NULL for whitespace.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_ltrim(buf: *mut StringBufferHandle, chars: *const c_char) {
    if !buf.is_null() {
        (*buf).0.left_trim(c_bytes(chars));
    }
}

/// Trim trailing delimiters. `chars` may be NULL for whitespace.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_rtrim(buf: *mut StringBufferHandle, chars: *const c_char) {
    if !buf.is_null() {
        (*buf).0.right_trim(c_bytes(chars));
    }
}

/// Trim both ends. `chars` may be NULL for whitespace.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn string_buffer_trim(buf: *mut StringBufferHandle, chars: *const c_char) {
    if !buf.is_null() {
        (*buf).0.trim(c_bytes(chars));
    }
}

// =============================================================================
// Version Information
// =============================================================================

/// Get the strbuf version string.
#[unsafe(no_mangle)]
pub extern "C" fn string_buffer_version() -> *const c_char {
    static VERSION: &[u8] = b"0.1.0\0";
    VERSION.as_ptr().cast::<c_char>()
}
