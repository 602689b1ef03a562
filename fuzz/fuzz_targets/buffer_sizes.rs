#![no_main]

use std::io::Cursor;
use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use multidigest::{Algorithm, BufferPool, MultiHasher, PoolConfig};
use sha2::Digest as _;

fuzz_target!(|input: (u16, Vec<u8>)| {
    let (buffer_size, data) = input;
    let buffer_size = usize::from(buffer_size).max(1);

    let pool = BufferPool::new(PoolConfig::new(buffer_size, 1).unwrap()).unwrap();
    let hasher = MultiHasher::new(Arc::new(pool));

    let digests = hasher
        .digest_reader(Cursor::new(&data), &[Algorithm::Sha256, Algorithm::Blake3])
        .unwrap();

    // Verify: chunking never changes the result
    assert_eq!(digests.len(), 2);
    assert_eq!(digests[0].as_bytes(), sha2::Sha256::digest(&data).as_slice());

    // Verify: determinism across pool configurations
    let reference = MultiHasher::default()
        .digest_reader(Cursor::new(&data), &[Algorithm::Sha256, Algorithm::Blake3])
        .unwrap();
    assert_eq!(digests, reference);
});
