//! File slicing example: expose a byte range of a file as its own source.
//!
//! Run with:
//!     cargo run --example slice_read -- /path/to/file

use std::env;
use std::fs::File;
use std::io::{self, Read};

use bytesource::{ByteSource, SourceStream};

/// A file-backed source: opening it opens the file again.
#[derive(Clone)]
struct FileSource {
    path: String,
}

/// Plain adapter; the default skip/available/close are fine for a file
/// read sequentially.
struct FileStream {
    file: File,
}

impl Read for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl SourceStream for FileStream {}

impl ByteSource for FileSource {
    fn open_stream(&self) -> io::Result<Box<dyn SourceStream>> {
        Ok(Box::new(FileStream {
            file: File::open(&self.path)?,
        }))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    let source = FileSource { path: path.clone() };
    println!("File: {}", path);
    println!("Size (counted by reading): {} bytes\n", source.size()?);

    // A window into the start of the file
    let head = source.slice(0, 64).read()?;
    println!("First 64 bytes:\n{}", String::from_utf8_lossy(&head));

    #[cfg(feature = "hash-blake3")]
    println!("\nBLAKE3: {}", source.hash()?);

    Ok(())
}
