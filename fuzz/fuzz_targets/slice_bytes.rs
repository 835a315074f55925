#![no_main]

use libfuzzer_sys::fuzz_target;

use bytesource::{ByteSource, wrap};

fuzz_target!(|input: (Vec<u8>, u16, u16)| {
    let (data, offset, length) = input;
    let offset = offset as u64;
    let length = length as u64;
    let source = wrap(data.clone());

    // The inherent in-memory slice clamps to the available data
    let clamped = source.slice(offset, length);
    let start = (offset as usize).min(data.len());
    let end = (offset as usize).saturating_add(length as usize).min(data.len());
    assert_eq!(clamped.read().unwrap(), data[start..end].to_vec());
    assert_eq!(clamped.size().unwrap(), (end - start) as u64);

    // The view slice agrees whenever the offset is reachable
    if offset <= data.len() as u64 {
        let view = ByteSource::slice(&source, offset, length);
        assert_eq!(view.read().unwrap(), data[start..end].to_vec());
        assert_eq!(view.size_if_known(), Some((end - start) as u64));

        // Re-slicing the view composes offsets against the parent; only
        // reachable composed offsets can open
        let half = length / 2;
        if offset + half <= data.len() as u64 {
            let inner = view.slice(half, length);
            let inner_start = (offset + half) as usize;
            assert_eq!(inner.read().unwrap(), data[inner_start..end].to_vec());
        }
    }
});
