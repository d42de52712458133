use hashgrid::*;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(100);
    let resolution = args.next().and_then(|s| s.parse().ok()).unwrap_or(8);

    let config = match HashGridConfig::new(seed, resolution, 1.0) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    let grid = HashGrid::new(config);
    let inv = 1.0 / resolution as f32;

    println!("seed {seed}, resolution {resolution}\n");

    for row in grid.hashes().chunks(resolution as usize) {
        let line: Vec<String> =
            row.iter().map(|hash| format!("{hash:08x}")).collect();
        println!("{}", line.join(" "));
    }

    println!("\n--- Corners ---");
    let last = grid.len() as i32 - 1;
    for index in [0, resolution - 1, last - resolution + 1, last] {
        let GridCoord { u, v } = coordinate(index, resolution, inv);
        println!(
            "index {index:>5} -> ({u:>4}, {v:>4}) = {:08x}",
            grid.hashes()[index as usize]
        );
    }

    println!("\nRender config: {:?}", grid.render_config().as_array());
}
