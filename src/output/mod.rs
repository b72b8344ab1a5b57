mod sink;

pub use sink::{NullSink, ProgressSink, Verbosity, WriterSink};
