use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::rng::source::{SeedMode, StreamId, UniformSource};

const DEFAULT_BASE_SEED: u64 = 0x5eed_1ec7_u64;
const DEFAULT_STREAMS: usize = 32;

/// Multi-stream uniform generator over independently seeded [`StdRng`]s.
///
/// Each stream owns its own generator, derived deterministically from the
/// base seed, the stream id and a per-stream reseed epoch. All state lives
/// in the instance; two `StreamRng`s built from the same base seed produce
/// identical draws.
#[derive(Debug)]
pub struct StreamRng {
    base_seed: u64,
    epochs: Vec<u64>,
    rngs: Vec<StdRng>,
}

impl StreamRng {
    /// Generator with the default base seed and stream count, seeded as by
    /// [`UniformSource::init_default`].
    pub fn new() -> Self {
        Self::with_base_seed(DEFAULT_BASE_SEED)
    }

    pub fn with_base_seed(base_seed: u64) -> Self {
        let epochs = vec![0; DEFAULT_STREAMS];
        let rngs = (0..DEFAULT_STREAMS)
            .map(|stream| StdRng::seed_from_u64(mix(base_seed, stream as u64, 0)))
            .collect();
        Self {
            base_seed,
            epochs,
            rngs,
        }
    }

    pub fn stream_count(&self) -> usize {
        self.rngs.len()
    }
}

impl Default for StreamRng {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSource for StreamRng {
    /// Panics if `stream >= stream_count()`; stream ids are fixed small
    /// constants chosen by the caller, not data.
    #[inline]
    fn next_value(&mut self, stream: StreamId) -> f64 {
        self.rngs[stream].random_range(0.0..1.0)
    }

    fn init_default(&mut self) {
        for (stream, rng) in self.rngs.iter_mut().enumerate() {
            *rng = StdRng::seed_from_u64(mix(self.base_seed, stream as u64, 0));
        }
        self.epochs.fill(0);
    }

    fn init_generator(&mut self, stream: StreamId, mode: SeedMode) {
        match mode {
            SeedMode::NewSeed => {
                self.epochs[stream] += 1;
                self.rngs[stream] =
                    StdRng::seed_from_u64(mix(self.base_seed, stream as u64, self.epochs[stream]));
            }
        }
    }
}

/// SplitMix64 finalizer over the (seed, stream, epoch) triple, so nearby
/// inputs land on unrelated StdRng seeds.
fn mix(base_seed: u64, stream: u64, epoch: u64) -> u64 {
    let mut x = base_seed
        .wrapping_add(stream.wrapping_mul(0x9e37_79b9_7f4a_7c15))
        .wrapping_add(epoch.wrapping_mul(0xbf58_476d_1ce4_e5b9));
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}
