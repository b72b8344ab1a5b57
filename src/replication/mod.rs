mod runner;
mod session;
mod trace;

pub use runner::{ENTRY_COST, ReplicationRunner, STOP_IMBALANCE};
pub use session::{Report, Simulation};
pub use trace::{RunTrace, Snapshot, TraceFormat};
