//! Smoke test: Walk a buffer through growth, trimming and compaction.

use strbuf::{appendf, StringBuffer};

fn main() -> strbuf::Result<()> {
    println!("strbuf Smoke Test");
    println!("=================");
    println!();

    let mut buf = StringBuffer::with_capacity(10)?;
    for word in ["Hello", " tobi", " was", " here"] {
        buf.append(word.as_bytes())?;
        println!("append {word:>6?} -> len {:>2}, capacity {}", buf.len(), buf.capacity());
    }
    println!();

    appendf!(buf, " {} times\n\n  ", 3)?;
    println!("Before trim: {buf:?}");
    buf.trim(None);
    println!("After trim:  {buf:?}");

    let reclaimed = buf.compact()?;
    println!("Compacted:   {buf:?} ({reclaimed} bytes reclaimed)");
    println!();

    let tail = buf.slice(6, -1)?;
    println!("slice(6, -1) = {tail:?}");
    match buf.find(b"ferret") {
        Ok(offset) => println!("find(\"ferret\") = {offset}"),
        Err(err) => println!("find(\"ferret\") -> {err}"),
    }

    Ok(())
}
