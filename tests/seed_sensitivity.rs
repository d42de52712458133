use hashgrid::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};

#[test]
fn test_distinct_seeds_rarely_collide() {
    let mut rng = SmallRng::seed_from_u64(42);

    let pairs = 10_000;
    let mut collisions = 0;

    for _ in 0..pairs {
        let s1: i32 = rng.random();
        let mut s2: i32 = rng.random();
        while s2 == s1 {
            s2 = rng.random();
        }
        let u = rng.random_range(-256..256);
        let v = rng.random_range(-256..256);

        if SmallHash::seed(s1).eat(u).eat(v) == SmallHash::seed(s2).eat(u).eat(v)
        {
            collisions += 1;
        }
    }

    // Less than 0.1%.
    assert!(
        collisions * 1000 < pairs,
        "{collisions} collisions in {pairs} seed pairs"
    );
}

#[test]
fn test_configurable_seeds_never_collide() {
    // Seeding and absorbing are both bijective on the state, so every
    // seed in the accepted range yields a different hash per cell.
    for (u, v) in [(0, 0), (-8, 7), (255, -256)] {
        let mut hashes: Vec<u32> = SEED_RANGE
            .map(|seed| SmallHash::seed(seed).eat(u).eat(v).state())
            .collect();
        hashes.sort_unstable();
        hashes.dedup();

        assert_eq!(hashes.len(), (MAX_SEED - MIN_SEED + 1) as usize);
    }
}

#[test]
fn test_adjacent_seeds_change_whole_grid() {
    let resolution = 16;
    let mut a = vec![0u32; 256];
    let mut b = vec![0u32; 256];

    fill_hashes(&mut a, 42, resolution);
    fill_hashes(&mut b, 43, resolution);

    assert!(a.iter().zip(&b).all(|(x, y)| x != y));

    // Flipped bits should average about half of 32.
    let flipped: u32 = a.iter().zip(&b).map(|(x, y)| (x ^ y).count_ones()).sum();
    let average = flipped as f64 / a.len() as f64;
    assert!(
        (12.0..20.0).contains(&average),
        "average of {average:.2} flipped bits"
    );
}
