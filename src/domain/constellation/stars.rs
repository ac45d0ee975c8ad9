//! Decorative background stars.
//!
//! Kept apart from the layout so that randomness only ever reaches purely
//! visual elements, never node geometry or hit-testing.

use rand::Rng;
use serde::Serialize;

use super::geometry::Point;

pub const DEFAULT_STAR_COUNT: usize = 150;

const MAX_STAR_RADIUS: f64 = 1.5;
const MIN_OPACITY: f64 = 0.1;
const OPACITY_RANGE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Star {
    pub position: Point,
    pub radius: f64,
    pub opacity: f64,
}

/// Scatters `count` stars uniformly over the canvas.
pub fn decorative_stars<R: Rng + ?Sized>(
    count: usize,
    width: f64,
    height: f64,
    rng: &mut R,
) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            position: Point::new(rng.gen::<f64>() * width, rng.gen::<f64>() * height),
            radius: rng.gen::<f64>() * MAX_STAR_RADIUS,
            opacity: rng.gen::<f64>() * OPACITY_RANGE + MIN_OPACITY,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn stars_stay_on_canvas() {
        let mut rng = StdRng::seed_from_u64(7);
        let stars = decorative_stars(DEFAULT_STAR_COUNT, 800.0, 600.0, &mut rng);
        assert_eq!(stars.len(), 150);
        for s in &stars {
            assert!((0.0..800.0).contains(&s.position.x));
            assert!((0.0..600.0).contains(&s.position.y));
            assert!((0.0..1.5).contains(&s.radius));
            assert!((0.1..0.5).contains(&s.opacity));
        }
    }

    #[test]
    fn same_seed_same_sky() {
        let a = decorative_stars(10, 100.0, 100.0, &mut StdRng::seed_from_u64(1));
        let b = decorative_stars(10, 100.0, 100.0, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }
}
