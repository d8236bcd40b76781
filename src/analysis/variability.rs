use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Uniform;

use crate::error::AdvisorError;

/// Default natural variability band applied to yield estimates (±3%).
pub const DEFAULT_VARIABILITY_MIN: f64 = 0.97;
pub const DEFAULT_VARIABILITY_MAX: f64 = 1.03;

/// Source of the seasonal variability factor multiplied into every yield estimate.
///
/// Production code draws from [`UniformVariability`]; tests pin the factor
/// with [`FixedVariability`].
pub trait Variability {
    fn factor(&mut self) -> f64;
}

/// Always returns the same factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedVariability(pub f64);

impl FixedVariability {
    /// A factor of 1.0, making predictions fully deterministic.
    pub fn neutral() -> Self {
        Self(1.0)
    }
}

impl Variability for FixedVariability {
    fn factor(&mut self) -> f64 {
        self.0
    }
}

/// Uniform draw in `[min, max]` from any random generator.
#[derive(Debug, Clone)]
pub struct UniformVariability<R> {
    dist: Uniform,
    rng: R,
}

impl<R: Rng> UniformVariability<R> {
    pub fn with_rng(min: f64, max: f64, rng: R) -> Result<Self, AdvisorError> {
        if !(min > 0.0 && min < max) {
            return Err(AdvisorError::ValidationError(format!(
                "variability bounds must satisfy 0 < min < max, got [{min}, {max}]"
            )));
        }
        let dist = Uniform::new(min, max)
            .map_err(|e| AdvisorError::ValidationError(format!("variability bounds: {e}")))?;
        Ok(Self { dist, rng })
    }
}

impl UniformVariability<StdRng> {
    /// ±3% band seeded from OS entropy.
    pub fn standard() -> Self {
        Self {
            dist: Uniform::new(DEFAULT_VARIABILITY_MIN, DEFAULT_VARIABILITY_MAX)
                .expect("default variability bounds are valid"),
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible draws for a given seed.
    pub fn seeded(min: f64, max: f64, seed: u64) -> Result<Self, AdvisorError> {
        Self::with_rng(min, max, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(min: f64, max: f64) -> Result<Self, AdvisorError> {
        Self::with_rng(min, max, StdRng::from_entropy())
    }
}

impl<R: Rng> Variability for UniformVariability<R> {
    fn factor(&mut self) -> f64 {
        self.rng.sample::<f64, _>(&self.dist)
    }
}

impl<V: Variability + ?Sized> Variability for Box<V> {
    fn factor(&mut self) -> f64 {
        (**self).factor()
    }
}

/// Build the variability source described by a configured band.
///
/// A zero-width band yields a [`FixedVariability`]; a seed makes draws reproducible.
pub fn variability_from_band(
    min: f64,
    max: f64,
    seed: Option<u64>,
) -> Result<Box<dyn Variability + Send>, AdvisorError> {
    if (max - min).abs() < f64::EPSILON {
        if min <= 0.0 {
            return Err(AdvisorError::ValidationError(format!(
                "variability factor must be positive, got {min}"
            )));
        }
        return Ok(Box::new(FixedVariability(min)));
    }
    Ok(match seed {
        Some(seed) => Box::new(UniformVariability::seeded(min, max, seed)?),
        None => Box::new(UniformVariability::from_entropy(min, max)?),
    })
}
