//! Split-and-rejoin example: slice a source into fixed-size parts, then
//! present the parts as one stream again.
//!
//! Run with:
//!     cargo run --example concat_parts

use bytesource::{ByteSource, concat, wrap};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create some sample data
    let data: Vec<u8> = (0..1024 * 1024).map(|i| (i * 31 + 7) as u8).collect();
    let whole = wrap(data);

    // Slice it into 64 KiB parts, the way a chunked upload would
    let part_len: u64 = 64 * 1024;
    let total = whole.size()?;
    println!("Splitting {} bytes into {} byte parts...\n", total, part_len);

    let mut parts = Vec::new();
    let mut offset = 0;
    while offset < total {
        parts.push(whole.slice(offset, part_len));
        offset += part_len;
    }
    println!("{} parts", parts.len());

    // Rejoin them; only one part's stream is ever open at a time
    let rejoined = concat(parts);
    println!("Rejoined size: {} bytes", rejoined.size()?);

    if rejoined.content_equals(&whole)? {
        println!("Rejoined content matches the original");
    } else {
        println!("MISMATCH - this should never happen");
    }

    #[cfg(feature = "hash-blake3")]
    println!("BLAKE3: {}", rejoined.hash()?);

    Ok(())
}
