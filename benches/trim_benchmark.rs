//! Trim benchmark: Measure trimming, slicing and compaction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strbuf::StringBuffer;

fn padded() -> StringBuffer {
    let mut buf = StringBuffer::with_capacity(4096).unwrap();
    buf.append(&[b' '; 512]).unwrap();
    buf.append(&[b'x'; 1024]).unwrap();
    buf.append(&[b'\n'; 512]).unwrap();
    buf
}

fn trim_whitespace(c: &mut Criterion) {
    let template = padded();
    c.bench_function("trim_512_each_side", |b| {
        b.iter(|| {
            let mut buf = template.clone();
            buf.trim(None);
            black_box(buf.len())
        });
    });
}

fn trim_charset(c: &mut Criterion) {
    let template = padded();
    c.bench_function("trim_charset_512_each_side", |b| {
        b.iter(|| {
            let mut buf = template.clone();
            buf.trim(Some(black_box(&b" \n"[..])));
            black_box(buf.len())
        });
    });
}

fn slice_middle(c: &mut Criterion) {
    let buf = padded();
    c.bench_function("slice_1k", |b| {
        b.iter(|| buf.slice(black_box(512), black_box(-513)).unwrap());
    });
}

fn compact_after_trim(c: &mut Criterion) {
    let template = padded();
    c.bench_function("compact_4k_to_1k", |b| {
        b.iter(|| {
            let mut buf = template.clone();
            buf.trim(None);
            black_box(buf.compact().unwrap())
        });
    });
}

criterion_group!(
    benches,
    trim_whitespace,
    trim_charset,
    slice_middle,
    compact_after_trim,
);
criterion_main!(benches);
