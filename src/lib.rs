//! Seedable per-cell hashes for square grids.
//!
//! `hashgrid` computes one pseudo-random `u32` per cell of a
//! `resolution × resolution` grid from the cell's integer coordinate and a
//! seed. The result is a flat, row-major buffer meant to be uploaded as-is
//! to a renderer that draws one instance per cell.
//!
//! Two pieces do the work:
//!
//! - [`SmallHash`] -- a tiny xxHash32-style mixing hash. Seed it once, then
//!   [`eat()`](SmallHash::eat) integers to derive new hashes.
//! - [`GridHashJob`] -- evaluates `hash.eat(u).eat(v)` for every cell, with
//!   `(u, v)` centered on the grid's midpoint. Runs sequentially or, with
//!   the `rayon` feature, one grid row per work unit.
//!
//! The coordinate derivation ([`coordinate()`]) and the hash constants are
//! frozen: a shader reconstructing cell positions from instance indices
//! uses the identical float math, and any change would break parity.
//!
//! ## Examples
//!
//! ```
//! use hashgrid::{GridHashJob, SmallHash};
//!
//! let resolution = 32;
//! let mut hashes = vec![0u32; (resolution * resolution) as usize];
//!
//! GridHashJob::new(&mut hashes, SmallHash::seed(100), resolution)
//!     .run_parallel();
//!
//! // The cell at the grid's center is (0, 0).
//! let center = (resolution / 2 * resolution + resolution / 2) as usize;
//! assert_eq!(hashes[center], SmallHash::seed(100).eat(0).eat(0).state());
//! ```
//!
//! For callers that keep a grid around and change its parameters,
//! [`HashGrid`] owns the buffer and recomputes it whenever the seed or
//! resolution change.
//!
//! ## Features
//!
//! - `std` (default) -- uses `std` for `floor()`. Without it the crate is
//!   `no_std` (it still needs `alloc`).
//! - `rayon` (default) -- parallel grid filling.
//! - `libm` -- uses `libm` for `floor()`.
//! - `serde` -- `Serialize`/`Deserialize` for the value types.
#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

mod config;
mod grid;
mod hash_grid;
mod render;
mod small_hash;

pub use config::*;
pub use grid::*;
pub use hash_grid::*;
pub use render::*;
pub use small_hash::*;

/// Fills `hashes` with the grid hashes for `seed` and `resolution`.
///
/// Shorthand for building a [`GridHashJob`] from `SmallHash::seed(seed)`
/// and running it with [`run_parallel()`](GridHashJob::run_parallel).
///
/// # Panics
///
/// If `resolution < 1` or `hashes.len() != resolution²`.
pub fn fill_hashes(hashes: &mut [u32], seed: i32, resolution: i32) {
    GridHashJob::new(hashes, SmallHash::seed(seed), resolution).run_parallel();
}
