pub mod cli;
pub mod estimation;
pub mod output;
pub mod replication;
pub mod rng;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
