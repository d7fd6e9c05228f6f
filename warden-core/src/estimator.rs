//! Success-probability estimation over independent Bernoulli trials.
//!
//! Each trial is a Bernoulli random variable, so the sample variance
//! reduces to `successes * (1 - mean) / (trials - 1)` and the 95%
//! confidence interval follows from the normal approximation.

/// Two-sided 95% normal quantile.
const Z_95: f64 = 1.96;

/// A 95% confidence interval around the estimated success probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfidenceInterval {
    lower: f64,
    upper: f64,
}

impl ConfidenceInterval {
    /// Returns the interval's lower bound.
    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    /// Returns the interval's upper bound.
    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }
}

/// Outcome counts of an estimation run, with derived statistics.
///
/// # Examples
/// ```
/// use warden_core::EstimatorResult;
///
/// let result = EstimatorResult::from_counts(300, 1000);
/// assert_eq!(result.mean(), 0.3);
/// assert!(result.variance().is_some());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EstimatorResult {
    successes: u64,
    trials: u64,
}

impl EstimatorResult {
    /// Builds a result from raw counts.
    ///
    /// # Panics
    /// Panics when `successes` exceeds `trials`; the counts come from
    /// counting successes over `trials` calls, so a violation is a logic
    /// error in the caller.
    #[must_use]
    pub fn from_counts(successes: u64, trials: u64) -> Self {
        assert!(
            successes <= trials,
            "successes ({successes}) must not exceed trials ({trials})"
        );
        Self { successes, trials }
    }

    /// Returns the number of successful trials.
    #[must_use]
    pub const fn successes(&self) -> u64 {
        self.successes
    }

    /// Returns the number of trials performed.
    #[must_use]
    pub const fn trials(&self) -> u64 {
        self.trials
    }

    /// Returns the point estimate of the success probability.
    ///
    /// NaN when no trials were performed.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.successes as f64 / self.trials as f64
    }

    /// Returns the Bernoulli sample variance, or `None` for a degenerate
    /// sample (`trials <= 1`).
    #[must_use]
    pub fn variance(&self) -> Option<f64> {
        if self.trials <= 1 {
            return None;
        }
        let mean = self.mean();
        Some(self.successes as f64 * (1.0 - mean) / (self.trials - 1) as f64)
    }

    /// Returns the 95% confidence interval around [`EstimatorResult::mean`],
    /// or `None` when the variance is undefined.
    #[must_use]
    pub fn confidence_interval(&self) -> Option<ConfidenceInterval> {
        let variance = self.variance()?;
        let half_width = Z_95 * (variance / self.trials as f64).sqrt();
        let mean = self.mean();
        Some(ConfidenceInterval {
            lower: mean - half_width,
            upper: mean + half_width,
        })
    }
}

/// Runs `trials` independent calls of `trial` and counts successes.
///
/// # Examples
/// ```
/// use warden_core::estimate;
///
/// let result = estimate(10, || true);
/// assert_eq!(result.successes(), 10);
/// assert_eq!(result.mean(), 1.0);
/// ```
pub fn estimate<F>(trials: u64, mut trial: F) -> EstimatorResult
where
    F: FnMut() -> bool,
{
    let mut successes = 0u64;
    for _ in 0..trials {
        if trial() {
            successes += 1;
        }
    }
    EstimatorResult::from_counts(successes, trials)
}
