//! Parameters handed to the renderer alongside the hash buffer.
//!
//! A renderer draws one instance per hash and places it by reconstructing
//! the cell from the instance index with the same derivation as
//! [`raw_coordinate()`](crate::raw_coordinate). The helpers here mirror
//! that reconstruction on the CPU.

use crate::raw_coordinate;

/// Per-grid constants for instance placement.
///
/// Packed in the order `[resolution, 1 / resolution, vertical_offset /
/// resolution]` by [`as_array()`](Self::as_array), which is how shaders
/// expect it in a single `float4`/`vec3` uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderConfig {
    /// Grid side length.
    pub resolution: f32,
    /// `1 / resolution`.
    pub inv_resolution: f32,
    /// Vertical offset divided by the resolution.
    pub vertical_scale: f32,
}

impl RenderConfig {
    /// Creates the placement constants for a grid of `resolution` cells
    /// per side and the given `vertical_offset`.
    ///
    /// # Panics
    ///
    /// If `resolution < 1`.
    pub fn new(resolution: i32, vertical_offset: f32) -> Self {
        assert!(
            resolution >= 1,
            "grid resolution must be at least 1, got {resolution}"
        );

        let inv_resolution = 1.0 / resolution as f32;

        Self {
            resolution: resolution as f32,
            inv_resolution,
            vertical_scale: vertical_offset / resolution as f32,
        }
    }

    /// The constants packed as `[resolution, 1 / resolution,
    /// vertical_scale]`.
    pub fn as_array(&self) -> [f32; 3] {
        [self.resolution, self.inv_resolution, self.vertical_scale]
    }

    /// World position of the instance drawn for `index`.
    ///
    /// Cells tile the unit square centered on the origin in the `xz`
    /// plane. `y` is displaced by the hash's top byte, mapped to
    /// `[-0.5, 0.5] × vertical_scale`.
    pub fn instance_position(&self, index: i32, hash: u32) -> [f32; 3] {
        let cell =
            raw_coordinate(index, self.resolution as i32, self.inv_resolution);

        [
            self.inv_resolution * (cell.u as f32 + 0.5) - 0.5,
            self.vertical_scale * ((1.0 / 255.0) * (hash >> 24) as f32 - 0.5),
            self.inv_resolution * (cell.v as f32 + 0.5) - 0.5,
        ]
    }
}

/// Color of the instance drawn for `hash`, from its three low bytes.
///
/// ## Examples
///
/// ```
/// use hashgrid::instance_color;
///
/// assert_eq!(instance_color(0x00FF_0000), [0.0, 0.0, 1.0]);
/// assert_eq!(instance_color(0xAB00_00FF), [1.0, 0.0, 0.0]);
/// ```
pub fn instance_color(hash: u32) -> [f32; 3] {
    [
        (hash & 0xFF) as f32 / 255.0,
        ((hash >> 8) & 0xFF) as f32 / 255.0,
        ((hash >> 16) & 0xFF) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_config() {
        let config = RenderConfig::new(16, 1.0);
        assert_eq!(config.as_array(), [16.0, 0.0625, 0.0625]);
    }

    #[test]
    fn positions_tile_unit_square() {
        let config = RenderConfig::new(4, 0.0);

        assert_eq!(config.instance_position(0, 0), [-0.375, 0.0, -0.375]);
        assert_eq!(config.instance_position(3, 0), [0.375, 0.0, -0.375]);
        assert_eq!(config.instance_position(15, 0), [0.375, 0.0, 0.375]);
    }

    #[test]
    fn vertical_displacement_uses_top_byte() {
        let config = RenderConfig::new(2, 2.0);

        let low = config.instance_position(0, 0x00FF_FFFF);
        let high = config.instance_position(0, 0xFF00_0000);

        assert_eq!(low[1], -0.5);
        assert_eq!(high[1], 0.5);
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn rejects_empty_grid() {
        RenderConfig::new(0, 1.0);
    }
}
