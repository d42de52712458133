//! An owned hash buffer that stays in sync with its configuration.

use crate::{GridHashJob, HashGridConfig, RenderConfig, SmallHash};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Owns the hashes of one grid together with the configuration that
/// produced them.
///
/// Changing the seed or resolution through
/// [`set_config()`](Self::set_config) recomputes the whole buffer before
/// returning, so [`hashes()`](Self::hashes) never exposes stale values.
///
/// ## Examples
///
/// ```
/// use hashgrid::{HashGrid, HashGridConfig, SmallHash};
///
/// let mut grid = HashGrid::new(HashGridConfig::new(0, 4, 1.0).unwrap());
/// assert_eq!(grid.len(), 16);
/// assert_eq!(grid.hashes()[0], SmallHash::seed(0).eat(-2).eat(-2).state());
///
/// let recomputed = grid.set_config(HashGridConfig::new(0, 1, 1.0).unwrap());
/// assert!(recomputed);
/// assert_eq!(grid.hashes(), &[SmallHash::seed(0).eat(0).eat(0).state()]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HashGrid {
    config: HashGridConfig,
    hashes: Vec<u32>,
}

impl HashGrid {
    /// Allocates and fills the grid for `config`.
    ///
    /// # Panics
    ///
    /// If `config.resolution < 1`. Use [`HashGridConfig::new()`] to reject
    /// such values up front.
    pub fn new(config: HashGridConfig) -> Self {
        check_resolution(config.resolution);

        let mut grid = Self {
            config,
            hashes: Vec::new(),
        };
        grid.recompute();

        grid
    }

    /// Replaces the configuration.
    ///
    /// Returns `true` if the seed or resolution changed and the hashes were
    /// recomputed. A change of the vertical offset alone only updates
    /// [`render_config()`](Self::render_config).
    ///
    /// # Panics
    ///
    /// If `config.resolution < 1` or `resolution²` overflows `i32`. The grid
    /// is left untouched in that case.
    pub fn set_config(&mut self, config: HashGridConfig) -> bool {
        check_resolution(config.resolution);

        let recompute = self.config.requires_recompute(&config);
        self.config = config;

        if recompute {
            self.recompute();
        }

        recompute
    }

    fn recompute(&mut self) {
        let HashGridConfig {
            seed, resolution, ..
        } = self.config;

        // Whole buffer is overwritten, no need to keep old contents.
        self.hashes.clear();
        self.hashes.resize(self.config.len(), 0);

        log::debug!(
            "Recomputing {} hashes (seed {seed}, resolution {resolution})",
            self.hashes.len()
        );

        GridHashJob::new(&mut self.hashes, SmallHash::seed(seed), resolution)
            .run_parallel();
    }

    /// The configuration the current hashes were computed for.
    pub fn config(&self) -> &HashGridConfig {
        &self.config
    }

    /// The parameters the renderer needs to place instances.
    pub fn render_config(&self) -> RenderConfig {
        self.config.render_config()
    }

    /// The hashes in row-major order.
    pub fn hashes(&self) -> &[u32] {
        &self.hashes
    }

    /// Number of cells, `resolution²`.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Always `false` for a grid built from a valid resolution.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Consumes the grid and returns its hash buffer.
    pub fn into_hashes(self) -> Vec<u32> {
        self.hashes
    }
}

// Same preconditions as `GridHashJob::new()`, checked before any buffer is
// cleared or allocated.
fn check_resolution(resolution: i32) {
    assert!(
        resolution >= 1,
        "grid resolution must be at least 1, got {resolution}"
    );
    assert!(
        resolution.checked_mul(resolution).is_some(),
        "grid resolution {resolution} overflows the index range"
    );
}

impl Default for HashGrid {
    fn default() -> Self {
        Self::new(HashGridConfig::default())
    }
}
