//! Validated grid parameters.
//!
//! The hashing kernel trusts its inputs. [`HashGridConfig`] is where
//! user-facing values (e.g. from an inspector or command line) are checked
//! or clamped before they reach it.

use crate::RenderConfig;
use core::ops::RangeInclusive;
use thiserror::Error;

/// Smallest supported grid resolution.
pub const MIN_RESOLUTION: i32 = 1;
/// Largest supported grid resolution.
pub const MAX_RESOLUTION: i32 = 512;
/// Smallest accepted seed.
pub const MIN_SEED: i32 = 0;
/// Largest accepted seed.
pub const MAX_SEED: i32 = 1000;
/// Largest accepted magnitude of the vertical offset.
pub const MAX_VERTICAL_OFFSET: f32 = 2.0;

/// Supported resolutions.
pub const RESOLUTION_RANGE: RangeInclusive<i32> =
    MIN_RESOLUTION..=MAX_RESOLUTION;
/// Accepted seeds.
pub const SEED_RANGE: RangeInclusive<i32> = MIN_SEED..=MAX_SEED;
/// Accepted vertical offsets.
pub const VERTICAL_OFFSET_RANGE: RangeInclusive<f32> =
    -MAX_VERTICAL_OFFSET..=MAX_VERTICAL_OFFSET;

/// A configuration value outside its accepted range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(
        "resolution {0} is outside {min}..={max}",
        min = MIN_RESOLUTION,
        max = MAX_RESOLUTION
    )]
    Resolution(i32),
    #[error("seed {0} is outside {min}..={max}", min = MIN_SEED, max = MAX_SEED)]
    Seed(i32),
    #[error(
        "vertical offset {0} is outside -{max}..={max}",
        max = MAX_VERTICAL_OFFSET
    )]
    VerticalOffset(f32),
}

/// Parameters of one hash grid.
///
/// `seed` and `resolution` determine the hashes; `vertical_offset` only
/// scales how the renderer displaces instances and never forces a
/// recompute.
///
/// ## Examples
///
/// ```
/// use hashgrid::{ConfigError, HashGridConfig};
///
/// let config = HashGridConfig::new(7, 32, 0.5).unwrap();
/// assert_eq!(config.len(), 1024);
///
/// assert_eq!(
///     HashGridConfig::new(7, 0, 0.5),
///     Err(ConfigError::Resolution(0))
/// );
///
/// // Clamping instead of rejecting.
/// let clamped = HashGridConfig::clamped(7, 9000, 0.5);
/// assert_eq!(clamped.resolution, 512);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HashGridConfig {
    pub seed: i32,
    pub resolution: i32,
    pub vertical_offset: f32,
}

impl Default for HashGridConfig {
    fn default() -> Self {
        Self {
            seed: 100,
            resolution: 16,
            vertical_offset: 1.0,
        }
    }
}

impl HashGridConfig {
    /// Creates a configuration, rejecting out-of-range values.
    pub fn new(
        seed: i32,
        resolution: i32,
        vertical_offset: f32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            seed,
            resolution,
            vertical_offset,
        };
        config.validate()?;

        Ok(config)
    }

    /// Creates a configuration, clamping every value into its range.
    ///
    /// A `NaN` vertical offset becomes `0.0`.
    pub fn clamped(seed: i32, resolution: i32, vertical_offset: f32) -> Self {
        let config = Self {
            seed: seed.clamp(MIN_SEED, MAX_SEED),
            resolution: resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION),
            vertical_offset: if vertical_offset.is_nan() {
                0.0
            } else {
                vertical_offset
                    .clamp(-MAX_VERTICAL_OFFSET, MAX_VERTICAL_OFFSET)
            },
        };

        if config.seed != seed {
            log::warn!("Seed {seed} clamped to {}", config.seed);
        }
        if config.resolution != resolution {
            log::warn!(
                "Resolution {resolution} clamped to {}",
                config.resolution
            );
        }
        if config.vertical_offset.to_bits() != vertical_offset.to_bits() {
            log::warn!(
                "Vertical offset {vertical_offset} clamped to {}",
                config.vertical_offset
            );
        }

        config
    }

    /// Checks every value against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !RESOLUTION_RANGE.contains(&self.resolution) {
            return Err(ConfigError::Resolution(self.resolution));
        }
        if !SEED_RANGE.contains(&self.seed) {
            return Err(ConfigError::Seed(self.seed));
        }
        // `contains()` is false for NaN.
        if !VERTICAL_OFFSET_RANGE.contains(&self.vertical_offset) {
            return Err(ConfigError::VerticalOffset(self.vertical_offset));
        }

        Ok(())
    }

    /// Number of grid cells, `resolution²`.
    pub fn len(&self) -> usize {
        let side = self.resolution.max(0) as usize;
        side * side
    }

    /// `true` only for a non-positive resolution, which never validates.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The parameters the renderer needs to place instances.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new(self.resolution, self.vertical_offset)
    }

    /// Whether switching from `self` to `other` invalidates the hashes.
    pub fn requires_recompute(&self, other: &Self) -> bool {
        self.seed != other.seed || self.resolution != other.resolution
    }
}
