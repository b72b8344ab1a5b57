mod error;
mod estimator;
mod interval_estimator;

pub use error::EstimateError;
pub use estimator::Estimator;
pub use interval_estimator::{ConfInterval, IntervalEstimator};
