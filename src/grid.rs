//! Per-cell hashing of a square grid.
//!
//! A grid of `resolution × resolution` cells is stored as a flat row-major
//! array. [`coordinate()`] maps a flat index back to the cell's coordinate
//! using the same float arithmetic a GPU-side evaluator uses, so that the
//! hash computed here and the position reconstructed by the renderer agree
//! for every instance. [`GridHashJob`] evaluates [`SmallHash`] once per cell
//! and writes the results into a caller-owned buffer.

use crate::SmallHash;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Bias added before flooring the row to absorb rounding at exact row
/// boundaries.
///
/// Part of the CPU/GPU contract. Shaders use the literal `0.0001`. With
/// `f32` arithmetic this places every index of every resolution in
/// `1..=512` in its exact row; `0.00001` is too small for some resolutions
/// above 396, where the product lands one ulp below the row start.
pub const EPSILON: f32 = 0.0001;

/// Integer coordinate of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    /// Column.
    pub u: i32,
    /// Row.
    pub v: i32,
}

impl GridCoord {
    /// Creates a coordinate from a column `u` and row `v`.
    pub const fn new(u: i32, v: i32) -> Self {
        Self { u, v }
    }

    /// Shifts a corner-origin coordinate so the origin sits at the grid's
    /// center.
    ///
    /// Both axes are offset by `resolution / 2` (truncating), so for odd
    /// resolutions the grid is symmetric and for even ones it extends one
    /// cell further into the negative range.
    #[inline(always)]
    pub const fn centered(self, resolution: i32) -> Self {
        let half = resolution / 2;
        Self {
            u: self.u - half,
            v: self.v - half,
        }
    }
}

#[inline(always)]
fn floor_to_i32(x: f32) -> i32 {
    #[cfg(feature = "libm")]
    {
        libm::floorf(x) as i32
    }
    #[cfg(all(feature = "std", not(feature = "libm")))]
    {
        x.floor() as i32
    }
    // Row operands are never negative, truncation is floor.
    #[cfg(not(any(feature = "std", feature = "libm")))]
    {
        x as i32
    }
}

/// Maps a flat `index` to its corner-origin cell coordinate.
///
/// *v = ⌊index × inv_resolution + ε⌋, u = index − resolution × v*
///
/// The multiply and add are evaluated separately in `f32` (no fused
/// multiply-add) to stay bit-identical with the shader.
#[inline(always)]
pub fn raw_coordinate(
    index: i32,
    resolution: i32,
    inv_resolution: f32,
) -> GridCoord {
    debug_assert!(
        0 <= index && index < resolution * resolution,
        "index {index} outside grid of resolution {resolution}"
    );

    let v = floor_to_i32(inv_resolution * index as f32 + EPSILON);
    let u = index - resolution * v;

    GridCoord { u, v }
}

/// Maps a flat `index` to its cell coordinate, centered on the grid's
/// midpoint.
///
/// ## Examples
///
/// ```
/// use hashgrid::{GridCoord, coordinate};
///
/// let inv = 1.0 / 4.0;
///
/// assert_eq!(coordinate(0, 4, inv), GridCoord::new(-2, -2));
/// assert_eq!(coordinate(6, 4, inv), GridCoord::new(0, -1));
/// assert_eq!(coordinate(15, 4, inv), GridCoord::new(1, 1));
/// ```
#[inline(always)]
pub fn coordinate(
    index: i32,
    resolution: i32,
    inv_resolution: f32,
) -> GridCoord {
    raw_coordinate(index, resolution, inv_resolution).centered(resolution)
}

// Everything a work unit needs, copied into each batch.
#[derive(Clone, Copy)]
struct CellHasher {
    hash: SmallHash,
    resolution: i32,
    inv_resolution: f32,
}

impl CellHasher {
    #[inline(always)]
    fn execute(&self, index: i32) -> u32 {
        let GridCoord { u, v } =
            coordinate(index, self.resolution, self.inv_resolution);

        self.hash.eat(u).eat(v).state()
    }

    #[inline]
    fn fill(&self, offset: usize, slots: &mut [u32]) {
        for (index, slot) in (offset..).zip(slots.iter_mut()) {
            *slot = self.execute(index as i32);
        }
    }
}

/// Fills a grid buffer with one hash per cell.
///
/// The job borrows the output buffer exclusively and only ever writes to
/// it. Every slot `i` receives `hash.eat(u).eat(v)` where `(u, v)` is
/// [`coordinate(i, …)`](coordinate). The seeded `hash` is a template; each
/// cell branches its own two-step sequence from it.
///
/// A job is built right before dispatch and consumed by one of
/// [`run()`](Self::run), [`run_parallel()`](Self::run_parallel) or
/// [`run_batched()`](Self::run_batched). Whichever is used, the output is
/// bit-identical and every slot has been written once the call returns.
///
/// ## Examples
///
/// ```
/// use hashgrid::{GridHashJob, SmallHash};
///
/// let resolution = 4;
/// let mut hashes = vec![0u32; 16];
///
/// GridHashJob::new(&mut hashes, SmallHash::seed(0), resolution)
///     .run_parallel();
///
/// assert_eq!(hashes[0], SmallHash::seed(0).eat(-2).eat(-2).state());
/// assert_eq!(hashes[15], SmallHash::seed(0).eat(1).eat(1).state());
/// ```
pub struct GridHashJob<'a> {
    hashes: &'a mut [u32],
    cell: CellHasher,
}

impl<'a> GridHashJob<'a> {
    /// Creates a job writing into `hashes`.
    ///
    /// # Panics
    ///
    /// If `resolution < 1`, if `resolution²` overflows `i32`, or if
    /// `hashes.len() != resolution²`. These are programming errors; the
    /// buffer is never resized or truncated.
    pub fn new(hashes: &'a mut [u32], hash: SmallHash, resolution: i32) -> Self {
        assert!(
            resolution >= 1,
            "grid resolution must be at least 1, got {resolution}"
        );
        let Some(length) = resolution.checked_mul(resolution) else {
            panic!("grid resolution {resolution} overflows the index range");
        };
        assert_eq!(
            hashes.len(),
            length as usize,
            "hash buffer must hold resolution² = {length} slots"
        );

        Self {
            hashes,
            cell: CellHasher {
                hash,
                resolution,
                inv_resolution: 1.0 / resolution as f32,
            },
        }
    }

    /// Grid side length.
    pub fn resolution(&self) -> i32 {
        self.cell.resolution
    }

    /// `1 / resolution`, as used for the row derivation.
    pub fn inv_resolution(&self) -> f32 {
        self.cell.inv_resolution
    }

    /// The seeded template hash.
    pub fn hash(&self) -> SmallHash {
        self.cell.hash
    }

    /// Number of cells, `resolution²`.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Always `false`, a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Computes the hash of the cell at `index` without writing it.
    #[inline]
    pub fn execute(&self, index: usize) -> u32 {
        debug_assert!(index < self.hashes.len());
        self.cell.execute(index as i32)
    }

    /// Fills the buffer in one sequential pass.
    pub fn run(self) {
        log::trace!(
            "Hashing {} cells sequentially (resolution {})",
            self.hashes.len(),
            self.cell.resolution
        );

        self.cell.fill(0, self.hashes);
    }

    /// Fills the buffer in parallel, one grid row per work unit.
    ///
    /// Without the `rayon` feature this is the same as [`run()`](Self::run).
    pub fn run_parallel(self) {
        let batch_size = self.cell.resolution as usize;
        self.run_batched(batch_size);
    }

    /// Fills the buffer in contiguous batches of `batch_size` slots.
    ///
    /// With the `rayon` feature the batches are distributed over the
    /// global thread pool; the call returns once all of them are done.
    ///
    /// # Panics
    ///
    /// If `batch_size` is zero.
    pub fn run_batched(self, batch_size: usize) {
        assert!(batch_size >= 1, "batch size must be at least 1");

        let Self { hashes, cell } = self;

        log::trace!(
            "Hashing {} cells in batches of {} (resolution {})",
            hashes.len(),
            batch_size,
            cell.resolution
        );

        #[cfg(feature = "rayon")]
        hashes
            .par_chunks_mut(batch_size)
            .enumerate()
            .for_each(|(batch, slots)| cell.fill(batch * batch_size, slots));

        #[cfg(not(feature = "rayon"))]
        hashes
            .chunks_mut(batch_size)
            .enumerate()
            .for_each(|(batch, slots)| cell.fill(batch * batch_size, slots));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_coordinate_walks_rows() {
        let inv = 1.0 / 3.0;
        let coords: Vec<_> =
            (0..9).map(|i| raw_coordinate(i, 3, inv)).collect();

        assert_eq!(
            coords,
            vec![
                GridCoord::new(0, 0),
                GridCoord::new(1, 0),
                GridCoord::new(2, 0),
                GridCoord::new(0, 1),
                GridCoord::new(1, 1),
                GridCoord::new(2, 1),
                GridCoord::new(0, 2),
                GridCoord::new(1, 2),
                GridCoord::new(2, 2),
            ]
        );
    }

    #[test]
    fn row_starts_land_in_their_row() {
        // A smaller bias floors these indices into the previous row.
        let resolution = 397;
        let inv = 1.0 / resolution as f32;

        for index in [156_021, 156_418, 156_815, 157_212] {
            assert_eq!(
                raw_coordinate(index, resolution, inv),
                GridCoord::new(0, index / resolution),
                "index {index}"
            );
        }
    }

    #[test]
    fn centering_truncates() {
        // Odd: symmetric around zero.
        assert_eq!(GridCoord::new(0, 4).centered(5), GridCoord::new(-2, 2));
        // Even: one extra cell on the negative side.
        assert_eq!(GridCoord::new(0, 3).centered(4), GridCoord::new(-2, 1));
        assert_eq!(GridCoord::new(0, 0).centered(1), GridCoord::new(0, 0));
    }

    #[test]
    fn single_cell_grid() {
        let mut hashes = [0u32];
        GridHashJob::new(&mut hashes, SmallHash::seed(9), 1).run();

        assert_eq!(hashes[0], SmallHash::seed(9).eat(0).eat(0).state());
    }

    #[test]
    fn execute_matches_written_slot() {
        let mut hashes = vec![0u32; 25];
        let mut expected = Vec::new();
        {
            let job = GridHashJob::new(&mut hashes, SmallHash::seed(3), 5);
            expected.extend((0..job.len()).map(|i| job.execute(i)));
            job.run();
        }
        assert_eq!(hashes, expected);
    }

    #[test]
    fn accessors() {
        let mut hashes = vec![0u32; 64];
        let job = GridHashJob::new(&mut hashes, SmallHash::seed(1), 8);

        assert_eq!(job.resolution(), 8);
        assert_eq!(job.inv_resolution(), 0.125);
        assert_eq!(job.hash(), SmallHash::seed(1));
        assert_eq!(job.len(), 64);
        assert!(!job.is_empty());
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn zero_resolution_panics() {
        let mut hashes: [u32; 0] = [];
        GridHashJob::new(&mut hashes, SmallHash::seed(0), 0);
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn negative_resolution_panics() {
        let mut hashes: [u32; 0] = [];
        GridHashJob::new(&mut hashes, SmallHash::seed(0), -4);
    }

    #[test]
    #[should_panic(expected = "resolution²")]
    fn wrong_length_panics() {
        let mut hashes = vec![0u32; 15];
        GridHashJob::new(&mut hashes, SmallHash::seed(0), 4);
    }

    #[test]
    #[should_panic(expected = "overflows")]
    fn huge_resolution_panics() {
        let mut hashes: [u32; 0] = [];
        GridHashJob::new(&mut hashes, SmallHash::seed(0), 50_000);
    }

    #[test]
    #[should_panic(expected = "batch size")]
    fn zero_batch_size_panics() {
        let mut hashes = vec![0u32; 4];
        GridHashJob::new(&mut hashes, SmallHash::seed(0), 2).run_batched(0);
    }
}
