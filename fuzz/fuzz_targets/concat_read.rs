#![no_main]

use libfuzzer_sys::fuzz_target;

use bytesource::{ByteSource, SourceStream, concat, skip_fully, wrap};

fuzz_target!(|data: Vec<u8>| {
    // Partition the data into spans of varying width, derived from the
    // data itself so the fuzzer can steer the shape
    let width = 1 + data.first().copied().unwrap_or(0) as usize % 13;

    let sources: Vec<_> = data.chunks(width).map(|span| wrap(span.to_vec())).collect();
    let joined = concat(sources);

    // Verify: the concatenation reproduces the original bytes
    let read = joined.read().unwrap();
    assert_eq!(read, data);

    // Verify: size agrees without consuming, and with the member sum
    assert_eq!(joined.size().unwrap(), data.len() as u64);
    assert_eq!(joined.size_if_known(), Some(data.len() as u64));

    // Verify: equality against a monolithic source of the same bytes
    assert!(joined.content_equals(&wrap(data.clone())).unwrap());

    // Verify: skipping half then reading yields the tail
    let half = (data.len() / 2) as u64;
    let mut stream = joined.open_stream().unwrap();
    skip_fully(&mut stream, half).unwrap();
    let mut tail = Vec::new();
    std::io::Read::read_to_end(&mut stream, &mut tail).unwrap();
    assert_eq!(tail, data[half as usize..]);
    stream.close().unwrap();

    // Verify: emptiness matches the data
    assert_eq!(joined.is_empty().unwrap(), data.is_empty());
});
