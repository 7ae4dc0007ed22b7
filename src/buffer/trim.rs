//! Trimming of leading and trailing delimiter bytes.
//!
//! Left-trimming never moves bytes: it advances the buffer's view offset.
//! Right-trimming overwrites trailing delimiters with the zero terminator.
//! Neither changes the capacity.

use super::StringBuffer;
use bitflags::bitflags;

bitflags! {
    /// Which ends of the content a trim applies to.
    ///
    /// # Example
    /// ```
    /// use strbuf::Trim;
    /// assert_eq!(Trim::LEFT | Trim::RIGHT, Trim::BOTH);
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Trim: u8 {
        /// Leading delimiters
        const LEFT = 0b01;
        /// Trailing delimiters
        const RIGHT = 0b10;
        /// Both ends
        const BOTH = Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

impl std::fmt::Debug for Trim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Whitespace as classified by the C locale, including vertical tab.
#[inline]
const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Check whether `byte` is a delimiter.
///
/// With no charset, or an empty one, any whitespace byte is a delimiter.
/// Otherwise only members of `charset` are.
#[inline]
pub fn is_delimiter(byte: u8, charset: Option<&[u8]>) -> bool {
    match charset {
        Some(set) if !set.is_empty() => set.contains(&byte),
        _ => is_space(byte),
    }
}

impl StringBuffer {
    /// Trim the selected ends of the content. Left is applied before right.
    pub fn trim_sides(&mut self, sides: Trim, charset: Option<&[u8]>) {
        if sides.contains(Trim::LEFT) {
            let skip = self
                .as_bytes()
                .iter()
                .take_while(|&&b| is_delimiter(b, charset))
                .count();
            self.view += skip;
        }

        if sides.contains(Trim::RIGHT) {
            let content = self.as_bytes();
            let len = content.len();
            let keep = content
                .iter()
                .rposition(|&b| !is_delimiter(b, charset))
                .map_or(0, |last| last + 1);
            if keep < len {
                let view = self.view;
                self.alloc[view + keep..view + len].fill(0);
            }
        }
    }

    /// Skip leading delimiters by advancing the view.
    pub fn left_trim(&mut self, charset: Option<&[u8]>) {
        self.trim_sides(Trim::LEFT, charset);
    }

    /// Zero out trailing delimiters.
    pub fn right_trim(&mut self, charset: Option<&[u8]>) {
        self.trim_sides(Trim::RIGHT, charset);
    }

    /// Trim both ends.
    pub fn trim(&mut self, charset: Option<&[u8]>) {
        self.trim_sides(Trim::BOTH, charset);
    }
}
