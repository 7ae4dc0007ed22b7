//! Formatted appends.
//!
//! A formatted append runs in two passes: a dry run that only counts the
//! bytes the arguments render to, then the real write into space that was
//! reserved from that count.

use super::string_buffer::terminated_len;
use super::StringBuffer;
use crate::error::{BufferError, Result};
use std::fmt::{self, Write};

/// Counts rendered bytes without storing them.
#[derive(Default)]
struct Measure {
    len: usize,
}

impl Write for Measure {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.len = self.len.checked_add(s.len()).ok_or(fmt::Error)?;
        Ok(())
    }
}

/// Writes rendered bytes into a fixed region, refusing to overrun it.
struct RegionWriter<'a> {
    dst: &'a mut [u8],
    written: usize,
}

impl Write for RegionWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.written + s.len();
        let dst = self.dst.get_mut(self.written..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.written = end;
        Ok(())
    }
}

impl StringBuffer {
    /// Append the rendering of `args`.
    ///
    /// Use the [`appendf!`](crate::appendf) macro rather than calling this
    /// directly. Fails with [`BufferError::InvalidArgument`] for an empty
    /// template and with [`BufferError::Format`] if a formatting trait
    /// reports an error or renders differently between the two passes.
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        if args.as_str() == Some("") {
            return Err(BufferError::invalid("format template must not be empty"));
        }

        let mut measure = Measure::default();
        measure.write_fmt(args)?;
        let required = measure.len;
        if required == 0 {
            return Ok(());
        }

        let (len, reservation) = self.reserve_tail_undoable(required)?;
        let start = self.view + len;
        let mut writer = RegionWriter {
            dst: &mut self.alloc[start..start + required],
            written: 0,
        };
        let outcome = writer.write_fmt(args);
        let written = writer.written;
        if outcome.is_err() || written != required {
            self.undo_reserve(len, reservation);
            return Err(BufferError::Format);
        }
        self.alloc[start + required] = 0;
        Ok(())
    }
}

impl Write for StringBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if terminated_len(s.as_bytes()) == 0 {
            return Ok(());
        }
        self.append(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Append formatted text to a [`StringBuffer`](crate::StringBuffer).
///
/// Takes the same arguments as [`format!`] and evaluates to
/// `strbuf::Result<()>`.
///
/// # Example
/// ```
/// use strbuf::{appendf, StringBuffer};
///
/// let mut buf = StringBuffer::new().unwrap();
/// appendf!(buf, "{} {}", 3, "cow").unwrap();
/// assert_eq!(buf.as_bytes(), b"3 cow");
/// ```
#[macro_export]
macro_rules! appendf {
    ($buffer:expr, $($arg:tt)*) => {
        $buffer.append_fmt(::core::format_args!($($arg)*))
    };
}
