//! Record-scoped random streams.
//!
//! Every record derives its randomness from the key `"{seed}-{index}"`:
//!
//! 1. The key's UTF-8 bytes are hashed with FNV-1a (64 bit).
//! 2. The hash seeds a `ChaCha8Rng`. ChaCha stream 0 is only used to draw
//!    the 32-bit seed of the field stream; ChaCha stream 1 drives every
//!    error-injection decision.
//! 3. The field stream is a fresh `ChaCha8Rng` seeded from that 32-bit value.
//!
//! FNV-1a and ChaCha8 are both value-stable, so a given key produces the
//! same bytes on every platform and release. The two streams never share
//! draws: adding or removing a draw in field generation cannot shift the
//! error decisions of the same record.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha stream id used to derive the field-generation seed.
pub const FIELD_SEED_STREAM: u64 = 0;

/// ChaCha stream id that drives error injection.
pub const ERROR_STREAM: u64 = 1;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64-bit hash.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// The string key that parameterizes all randomness of one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn new(seed: &str, index: u64) -> Self {
        Self(format!("{seed}-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// FNV-1a hash of the key.
    pub fn digest(&self) -> u64 {
        fnv1a64(self.0.as_bytes())
    }
}

/// A generator keyed by a [`RecordKey`] on a fixed ChaCha stream.
#[derive(Debug, Clone)]
pub struct KeyedRng {
    inner: ChaCha8Rng,
}

impl KeyedRng {
    pub fn new(key: &RecordKey, stream: u64) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(key.digest());
        inner.set_stream(stream);
        Self { inner }
    }

    /// Uniform float in `[0, 1)` built from the top 53 bits of one `u64`.
    pub fn next_float(&mut self) -> f64 {
        (self.inner.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// A signed 32-bit integer, the raw `u32` draw reinterpreted.
    pub fn next_int32(&mut self) -> i32 {
        self.inner.next_u32() as i32
    }

    /// `floor(next_float() * len)`. Always consumes one draw, returns 0 for
    /// `len == 0`.
    pub fn pick(&mut self, len: usize) -> usize {
        (self.next_float() * len as f64) as usize
    }
}

/// The two independent streams of one record.
pub struct RecordStreams {
    /// Drives identifier, name, address and phone generation.
    pub fields: ChaCha8Rng,
    /// Drives error count, field choice, error kind and position.
    pub errors: KeyedRng,
}

impl RecordStreams {
    pub fn derive(seed: &str, index: u64) -> Self {
        let key = RecordKey::new(seed, index);
        let mut seeder = KeyedRng::new(&key, FIELD_SEED_STREAM);
        let field_seed = seeder.next_int32() as u32 as u64;
        Self {
            fields: ChaCha8Rng::seed_from_u64(field_seed),
            errors: KeyedRng::new(&key, ERROR_STREAM),
        }
    }
}
