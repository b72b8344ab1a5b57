mod source;
mod stream_rng;

pub use source::{SeedMode, StreamId, UniformSource};
pub use stream_rng::StreamRng;
