use std::fmt::{Display, Formatter};

use crate::estimation::error::EstimateError;
use crate::estimation::estimator::Estimator;

/// Two-sided normal-approximation confidence interval around a point
/// estimate, tagged with its display label (e.g., `"95%"`).
#[derive(Debug, Clone, PartialEq)]
pub struct ConfInterval {
    pub low: f64,
    pub high: f64,
    pub label: String,
}

impl Display for ConfInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Confidence Interval [ {:.4}, {:.4}]",
            self.label, self.low, self.high
        )
    }
}

/// Streaming point and interval estimator.
///
/// Maintains the running count, sum and `(count - 1) * sample_variance` of
/// the values seen so far, updated in a single numerically stable pass.
/// Nothing is recomputed from a stored sample: after `n` observations the
/// state is the same three scalars, and `variance` agrees with the classical
/// two-pass `Σ(xᵢ − x̄)² / (n − 1)` to floating-point tolerance.
///
/// The z quantile and confidence label are fixed at construction; [`reset`]
/// only clears the accumulated observations.
#[derive(Debug, Clone)]
pub struct IntervalEstimator {
    count: u64,
    sum: f64,
    sum_sq_dev: f64,
    z: f64,
    label: String,
}

impl IntervalEstimator {
    pub fn new<L: Into<String>>(z: f64, label: L) -> Self {
        Self {
            count: 0,
            sum: 0.0,
            sum_sq_dev: 0.0,
            z,
            label: label.into(),
        }
    }

    /// Estimator for the ubiquitous 95% confidence level (z = 1.96).
    pub fn p95() -> Self {
        Self::new(1.96, "95%")
    }

    /// Number of observations processed since construction or [`reset`].
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean, or `0.0` until at least two observations have been
    /// processed. The fallback keeps early-stage reporting safe; callers
    /// that need a hard failure should go through [`variance`] first.
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.count > 1 {
            self.sum / self.count as f64
        } else {
            0.0
        }
    }

    /// Sample variance of the observations processed so far.
    ///
    /// Undefined for fewer than two observations; that is a hard error
    /// rather than a silent zero, since callers derive interval widths
    /// from it.
    pub fn variance(&self) -> Result<f64, EstimateError> {
        if self.count > 1 {
            Ok(self.sum_sq_dev / (self.count - 1) as f64)
        } else {
            Err(EstimateError::InsufficientData {
                observed: self.count,
            })
        }
    }

    /// Normal-approximation confidence interval around the running mean,
    /// with half-width `z * sqrt(variance / count)`.
    pub fn conf_interval(&self) -> Result<ConfInterval, EstimateError> {
        let hw = self.z * (self.variance()? / self.count as f64).sqrt();
        let point = self.mean();
        Ok(ConfInterval {
            low: point - hw,
            high: point + hw,
            label: self.label.clone(),
        })
    }

    /// Projects how many observations a run needs for the confidence
    /// interval to reach the target half-width: `epsilon` itself, or
    /// `mean * epsilon` when `relative`.
    ///
    /// Classical sample-size formula `floor(variance * z^2 / width^2)`.
    /// Fails with [`EstimateError::ZeroWidth`] when the target width is
    /// zero (e.g., relative mode while the running mean is zero).
    pub fn required_reps(&self, epsilon: f64, relative: bool) -> Result<u64, EstimateError> {
        let var = self.variance()?;
        let width = if relative {
            self.mean() * epsilon
        } else {
            epsilon
        };
        if width == 0.0 {
            return Err(EstimateError::ZeroWidth);
        }
        Ok(((var * self.z * self.z) / (width * width)).floor() as u64)
    }

    /// Discards all accumulated observations, keeping z and the label.
    /// Used between a trial phase and a production phase.
    pub fn reset(&mut self) {
        self.count = 0;
        self.sum = 0.0;
        self.sum_sq_dev = 0.0;
    }
}

impl Estimator for IntervalEstimator {
    #[inline]
    fn add(&mut self, v: f64) {
        self.count += 1;
        if self.count > 1 {
            // Incremental form of (k-1)*variance: with the pre-update sum s
            // over k-1 values, the term added for x_k is (s - (k-1)x)^2 / (k(k-1)).
            let diff = self.sum - (self.count - 1) as f64 * v;
            self.sum_sq_dev += diff / self.count as f64 * (diff / (self.count - 1) as f64);
        }
        self.sum += v;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        self.mean()
    }
}
