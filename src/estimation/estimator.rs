/// Online scalar estimator fed one observation at a time.
///
/// Implementations accept values incrementally via [`add`] and expose the
/// current point estimate via [`estimation`]. No implementation may buffer
/// the raw sample; memory must stay O(1) in the number of observations.
pub trait Estimator {
    /// Incorporates a new observation.
    fn add(&mut self, v: f64);

    /// Returns the current point estimate.
    fn estimation(&self) -> f64;
}
