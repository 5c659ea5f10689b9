//! Tessellation Configuration and Builder
//!
//! Construction-time parameters for a diagram. A configuration is immutable for
//! the lifetime of the diagram built from it; resizing or regenerating means
//! building a new configuration and a new diagram.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};
use crate::generation::{LloydOptions, DEFAULT_LLOYD_ITERATIONS};
use crate::geometry::Bounds;

/// Upper bound on relaxation rounds accepted by the builder
pub const MAX_LLOYD_ITERATIONS: usize = 64;

/// Configuration for deterministic tessellation generation
///
/// The same configuration (including `seed`) always produces the identical
/// diagram.
///
/// # Example
///
/// ```rust
/// use voronoi_tessellation::*;
///
/// let config = TessellationConfigBuilder::new()
///     .seed(42)
///     .size(800.0, 600.0)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: TessellationConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationConfig {
    /// Width of the bounding rectangle
    pub width: f64,

    /// Height of the bounding rectangle
    pub height: f64,

    /// Number of generator points to sample
    ///
    /// The diagram may end up with fewer cells when some cells are degenerate.
    pub point_count: usize,

    /// Number of Lloyd's Relaxation iterations
    ///
    /// - 0: Raw random Voronoi cells (irregular)
    /// - 6: Default, the cell-shape statistics renderers are tuned for
    /// - 8+: Diminishing returns
    pub relax_iterations: usize,

    /// Optional early exit for relaxation (fraction of the bounds diagonal)
    ///
    /// - 0.0: Default, always run `relax_iterations` rounds
    /// - 0.001: Stop once no generator moves more than 0.1% of the diagonal
    pub convergence_threshold: f64,

    /// Random seed for generator sampling
    pub seed: u64,
}

impl TessellationConfig {
    /// The bounding rectangle `[0, width] x [0, height]`
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    pub fn lloyd_options(&self) -> LloydOptions {
        LloydOptions {
            max_iterations: self.relax_iterations,
            convergence_threshold: self.convergence_threshold,
        }
    }
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 1024.0,
            point_count: 1024,
            relax_iterations: DEFAULT_LLOYD_ITERATIONS,
            convergence_threshold: 0.0,
            seed: rand::random(),
        }
    }
}

/// Builder for creating TessellationConfig with validation
///
/// # Example
///
/// ```rust
/// use voronoi_tessellation::*;
///
/// // Use defaults
/// let config = TessellationConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = TessellationConfigBuilder::new()
///     .seed(12345)
///     .size(1.0, 1.0)
///     .unwrap()
///     .point_count(256)
///     .relax_iterations(8)
///     .unwrap()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct TessellationConfigBuilder {
    seed: Option<u64>,
    width: f64,
    height: f64,
    point_count: usize,
    relax_iterations: usize,
    convergence_threshold: f64,
}

impl TessellationConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (drawn from `rand::random`)
    /// - size: 1024 x 1024
    /// - point_count: 1024
    /// - relax_iterations: 6
    /// - convergence_threshold: 0.0 (disabled)
    pub fn new() -> Self {
        Self {
            seed: None,
            width: 1024.0,
            height: 1024.0,
            point_count: 1024,
            relax_iterations: DEFAULT_LLOYD_ITERATIONS,
            convergence_threshold: 0.0,
        }
    }

    /// Set the random seed for generator sampling
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the bounding rectangle size
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either side is non-positive or non-finite
    pub fn size(mut self, width: f64, height: f64) -> Result<Self> {
        if Bounds::new(width, height).is_err() {
            return Err(VoronoiError::InvalidConfig(format!(
                "size must be positive and finite (got {} x {})",
                width, height
            )));
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    /// Set the number of generator points
    pub fn point_count(mut self, count: usize) -> Self {
        self.point_count = count;
        self
    }

    /// Set the number of Lloyd's Relaxation iterations
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > 64
    pub fn relax_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations > MAX_LLOYD_ITERATIONS {
            return Err(VoronoiError::InvalidConfig(format!(
                "relax iterations must be <= {} (got {})",
                MAX_LLOYD_ITERATIONS, iterations
            )));
        }
        self.relax_iterations = iterations;
        Ok(self)
    }

    /// Enable early exit once generators stop moving
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if threshold is negative or non-finite
    pub fn convergence_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(VoronoiError::InvalidConfig(format!(
                "convergence threshold must be >= 0 (got {})",
                threshold
            )));
        }
        self.convergence_threshold = threshold;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, draws a random one.
    pub fn build(self) -> Result<TessellationConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(TessellationConfig {
            width: self.width,
            height: self.height,
            point_count: self.point_count,
            relax_iterations: self.relax_iterations,
            convergence_threshold: self.convergence_threshold,
            seed,
        })
    }
}

impl Default for TessellationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
