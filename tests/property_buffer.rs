//! Property tests for the string buffer.
//!
//! Checks concatenation, growth rounding, slicing, equality and trimming
//! against a plain `Vec<u8>` model.

mod common;

use common::{init_test_logging, test_proptest_config};
use proptest::prelude::*;
use strbuf::{appendf, is_delimiter, StringBuffer, GROWTH_QUANTUM};

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Non-empty byte strings without a zero terminator inside.
fn arb_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=255, 1..64)
}

/// Byte strings biased towards whitespace so trims have work to do.
fn arb_spaced() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            Just(b' '),
            Just(b'\t'),
            Just(b'\n'),
            Just(b'\r'),
            b'a'..=b'z',
        ],
        1..48,
    )
}

#[derive(Debug, Clone)]
enum Op {
    Append(Vec<u8>),
    Prepend(Vec<u8>),
    LeftTrim,
    RightTrim,
    Compact,
    Format(u32),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => arb_spaced().prop_map(Op::Append),
        2 => arb_spaced().prop_map(Op::Prepend),
        1 => Just(Op::LeftTrim),
        1 => Just(Op::RightTrim),
        1 => Just(Op::Compact),
        1 => any::<u32>().prop_map(Op::Format),
    ]
}

fn model_trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| !is_delimiter(b, None))
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|&b| !is_delimiter(b, None))
        .map_or(start, |last| last + 1);
    &bytes[start..end]
}

fn round_up(n: usize) -> usize {
    n.div_ceil(GROWTH_QUANTUM) * GROWTH_QUANTUM
}

// ============================================================================
// Append / Prepend
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(256))]

    /// append(a); append(b) yields a‖b.
    #[test]
    fn append_concatenates(a in arb_bytes(), b in arb_bytes()) {
        init_test_logging();
        let mut buf = StringBuffer::new().unwrap();
        buf.append(&a).unwrap();
        buf.append(&b).unwrap();
        prop_assert_eq!(buf.len(), a.len() + b.len());
        let expected = [a, b].concat();
        prop_assert_eq!(buf.as_bytes(), expected.as_slice());
    }

    /// append(b); prepend(a) yields a‖b.
    #[test]
    fn prepend_mirrors_append(a in arb_bytes(), b in arb_bytes()) {
        init_test_logging();
        let mut buf = StringBuffer::with_capacity(8).unwrap();
        buf.append(&b).unwrap();
        buf.prepend(&a).unwrap();
        let expected = [a, b].concat();
        prop_assert_eq!(buf.as_bytes(), expected.as_slice());
    }

    /// Capacity is the smallest quantum multiple covering the content once grown.
    #[test]
    fn growth_rounds_to_quantum(chunks in prop::collection::vec(arb_bytes(), 1..80)) {
        init_test_logging();
        let mut buf = StringBuffer::new().unwrap();
        let mut model = Vec::new();
        for chunk in &chunks {
            buf.append(chunk).unwrap();
            model.extend_from_slice(chunk);

            if model.len() >= 64 {
                prop_assert_eq!(buf.capacity(), round_up(model.len()));
            } else {
                prop_assert_eq!(buf.capacity(), 64);
            }
        }
        prop_assert_eq!(buf.as_bytes(), model.as_slice());
    }
}

// ============================================================================
// Slicing and Equality
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(256))]

    /// Slicing never mutates and matches the one's-complement end rule.
    #[test]
    fn slice_matches_model(content in arb_bytes(), from in 0usize..80, to in -80isize..80) {
        init_test_logging();
        let buf = StringBuffer::from_bytes(&content).unwrap();
        let before = buf.clone();
        let len = isize::try_from(content.len()).unwrap();

        let end = if to < 0 { len - !to } else { to.min(len) };
        let result = buf.slice(from, to);

        prop_assert_eq!(&buf, &before);
        match usize::try_from(end) {
            Ok(end) if end >= from => {
                let slice = result.unwrap();
                prop_assert_eq!(slice.as_bytes(), &content[from..end]);
                prop_assert_eq!(slice.capacity(), end - from);
            }
            _ => prop_assert!(result.is_err()),
        }
    }

    /// A -1 end is the content end; a large end is clamped.
    #[test]
    fn slice_open_end(content in arb_bytes(), from in 0usize..64) {
        init_test_logging();
        let buf = StringBuffer::from_bytes(&content).unwrap();
        let from = from.min(content.len());
        let open = buf.slice(from, -1).unwrap();
        prop_assert_eq!(open.as_bytes(), &content[from..]);
        let clamped = buf.slice(from, 10_000).unwrap();
        prop_assert_eq!(clamped.as_bytes(), &content[from..]);
    }

    /// Equality is reflexive, symmetric and sensitive to one-sided changes.
    #[test]
    fn equals_laws(a in arb_bytes(), extra in arb_bytes()) {
        init_test_logging();
        let x = StringBuffer::from_bytes(&a).unwrap();
        let mut y = StringBuffer::with_capacity(4).unwrap();
        y.append(&a).unwrap();

        prop_assert!(StringBuffer::equals(Some(&x), Some(&x)));
        prop_assert!(StringBuffer::equals(Some(&x), Some(&y)));
        prop_assert!(StringBuffer::equals(Some(&y), Some(&x)));

        y.append(&extra).unwrap();
        prop_assert!(!StringBuffer::equals(Some(&x), Some(&y)));
        prop_assert!(!StringBuffer::equals(Some(&y), Some(&x)));
    }

    /// find reports the first occurrence of any substring.
    #[test]
    fn find_locates_substrings(content in arb_bytes(), start in 0usize..64, width in 1usize..8) {
        init_test_logging();
        let buf = StringBuffer::from_bytes(&content).unwrap();
        let start = start % content.len();
        let end = (start + width).min(content.len());
        let needle = &content[start..end];

        let found = buf.find(needle).unwrap();
        prop_assert!(found <= start);
        prop_assert_eq!(&content[found..found + needle.len()], needle);
    }
}

// ============================================================================
// Trimming and Compaction
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(256))]

    /// trim removes only the leading and trailing whitespace runs.
    #[test]
    fn trim_matches_model(content in arb_spaced()) {
        init_test_logging();
        let mut buf = StringBuffer::from_bytes(&content).unwrap();
        let capacity = buf.capacity();
        buf.trim(None);
        prop_assert_eq!(buf.as_bytes(), model_trim(&content));
        prop_assert_eq!(buf.capacity(), capacity);
    }

    /// compact after trim fits capacity to content and reports the difference.
    #[test]
    fn compact_after_trim(content in arb_spaced(), capacity in 64usize..2048) {
        init_test_logging();
        let mut buf = StringBuffer::with_capacity(capacity).unwrap();
        buf.append(&content).unwrap();
        buf.trim(None);
        let trimmed = buf.as_bytes().to_vec();
        let old = buf.capacity();

        let reclaimed = buf.compact().unwrap();
        prop_assert_eq!(buf.capacity(), buf.len());
        prop_assert_eq!(reclaimed, old - trimmed.len());
        prop_assert_eq!(buf.as_bytes(), trimmed.as_slice());
        prop_assert_eq!(buf.offset(), 0);
    }

    /// Any mix of operations keeps content equal to the model and in bounds.
    #[test]
    fn operations_match_model(ops in prop::collection::vec(arb_op(), 1..40)) {
        init_test_logging();
        let mut buf = StringBuffer::with_capacity(16).unwrap();
        let mut model: Vec<u8> = Vec::new();

        for op in ops {
            match op {
                Op::Append(bytes) => {
                    buf.append(&bytes).unwrap();
                    model.extend_from_slice(&bytes);
                }
                Op::Prepend(bytes) => {
                    buf.prepend(&bytes).unwrap();
                    model = [bytes, model].concat();
                }
                Op::LeftTrim => {
                    buf.left_trim(None);
                    let skip = model.iter().take_while(|&&b| is_delimiter(b, None)).count();
                    model.drain(..skip);
                }
                Op::RightTrim => {
                    buf.right_trim(None);
                    while model.last().is_some_and(|&b| is_delimiter(b, None)) {
                        model.pop();
                    }
                }
                Op::Compact => {
                    let old = buf.capacity();
                    prop_assert_eq!(buf.compact().unwrap(), old - model.len());
                }
                Op::Format(n) => {
                    appendf!(buf, "<{}>", n).unwrap();
                    model.extend_from_slice(format!("<{n}>").as_bytes());
                }
            }

            prop_assert_eq!(buf.as_bytes(), model.as_slice());
            prop_assert!(buf.offset() + buf.len() <= buf.capacity());
        }
    }
}
