//! Uniform random generator points
//!
//! Initial generators are drawn independently and uniformly over the bounding
//! rectangle. No spacing is enforced: clusters and even exact duplicates are
//! legal, and Lloyd's relaxation is what evens the distribution out.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::geometry::{Bounds, Point};

/// Draw `count` points uniformly in `[0, width] x [0, height]`
///
/// The same seed always produces the same sequence.
///
/// # Example
///
/// ```rust
/// use voronoi_tessellation::{Bounds, generation::generate_random_points};
///
/// let bounds = Bounds::new(2.0, 1.0).unwrap();
/// let points = generate_random_points(100, &bounds, 42);
/// assert_eq!(points.len(), 100);
/// assert!(points.iter().all(|p| bounds.contains(*p)));
/// ```
pub fn generate_random_points(count: usize, bounds: &Bounds, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let x = rng.gen_range(0.0..=bounds.width);
            let y = rng.gen_range(0.0..=bounds.height);
            Point::new(x, y)
        })
        .collect()
}
