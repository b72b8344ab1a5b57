/// Index of one logical draw sequence within a multi-stream generator.
pub type StreamId = usize;

/// How [`UniformSource::init_generator`] should re-seed a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeedMode {
    /// Advance the stream to a fresh seed, independent of every sequence
    /// it has produced so far. Used to separate a production run from the
    /// trial run that preceded it.
    NewSeed,
}

/// Source of independent U(0,1) draws, organized as numbered streams.
///
/// Streams are logically separate sequences from one generator instance,
/// so distinct components (or a future parallel driver) can consume
/// non-overlapping randomness. Only this external contract is relied on;
/// the generator's internals (period, seed tables) are implementation
/// detail.
pub trait UniformSource {
    /// Next draw from `stream`, uniform in `[0, 1)`. Advances only that
    /// stream's state.
    fn next_value(&mut self, stream: StreamId) -> f64;

    /// Restores every stream to its deterministic default seeding, for
    /// reproducible trial runs.
    fn init_default(&mut self);

    /// Re-seeds a single stream according to `mode`.
    fn init_generator(&mut self, stream: StreamId, mode: SeedMode);
}
