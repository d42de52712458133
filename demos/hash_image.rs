use hashgrid::*;
use image::{Rgb, RgbImage};

// Pixels per grid cell.
const CELL: u32 = 4;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(100);
    let resolution = args.next().and_then(|s| s.parse().ok()).unwrap_or(128);

    let config = HashGridConfig::clamped(seed, resolution, 1.0);
    let grid = HashGrid::new(config);
    let side = config.resolution as u32;

    // Row 0 is v = -resolution / 2, drawn at the bottom.
    let image = RgbImage::from_fn(side * CELL, side * CELL, |x, y| {
        let u = x / CELL;
        let v = side - 1 - y / CELL;
        let hash = grid.hashes()[(v * side + u) as usize];

        let [r, g, b] = instance_color(hash).map(|c| (c * 255.0).round() as u8);
        Rgb([r, g, b])
    });

    let path = format!("hashgrid_{}_{}.png", config.seed, config.resolution);
    match image.save(&path) {
        Ok(()) => println!("Wrote {path}"),
        Err(error) => {
            eprintln!("Failed to write {path}: {error}");
            std::process::exit(1);
        }
    }
}
