//! A single drifting particle on a toroidal surface.

use glam::Vec2;

use super::rng::Rng;
use crate::api::config::ParticleConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Uniformly random position inside `bounds`, velocity and radius per `config`.
    pub fn random(bounds: Vec2, config: &ParticleConfig, rng: &mut Rng) -> Self {
        let pos = Vec2::new(rng.range(0.0, bounds.x), rng.range(0.0, bounds.y));
        let vel = Vec2::new(
            rng.range(-config.max_speed, config.max_speed),
            rng.range(-config.max_speed, config.max_speed),
        );
        let radius = rng.range(config.radius_min, config.radius_max);
        Self { pos, vel, radius }
    }

    /// Integrate one frame and wrap around the edges of `bounds`.
    pub fn advance(&mut self, bounds: Vec2) {
        self.pos = wrap(self.pos + self.vel, bounds);
    }
}

/// Toroidal wraparound: leaving one edge re-enters at the opposite edge on the same frame.
pub fn wrap(pos: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, bounds.x), wrap_axis(pos.y, bounds.y))
}

fn wrap_axis(v: f32, max: f32) -> f32 {
    if v < 0.0 {
        max
    } else if v > max {
        0.0
    } else {
        v
    }
}

/// Opacity of the link between two particles `dist` apart, or `None` when too far.
/// Fades linearly from `max_alpha` at zero distance to nothing at `max_dist`.
pub fn link_alpha(dist: f32, max_dist: f32, max_alpha: f32) -> Option<f32> {
    (dist < max_dist).then(|| (1.0 - dist / max_dist) * max_alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn moved(pos: Vec2, vel: Vec2) -> Vec2 {
        let mut p = Particle::new(pos, vel, 1.0);
        p.advance(BOUNDS);
        p.pos
    }

    #[test]
    fn wraps_right_edge_to_zero() {
        assert_eq!(moved(Vec2::new(799.9, 10.0), Vec2::new(0.25, 0.0)).x, 0.0);
    }

    #[test]
    fn wraps_left_edge_to_width() {
        assert_eq!(moved(Vec2::new(0.1, 10.0), Vec2::new(-0.25, 0.0)).x, 800.0);
    }

    #[test]
    fn wraps_bottom_edge_to_zero() {
        assert_eq!(moved(Vec2::new(10.0, 599.9), Vec2::new(0.0, 0.25)).y, 0.0);
    }

    #[test]
    fn wraps_top_edge_to_height() {
        assert_eq!(moved(Vec2::new(10.0, 0.1), Vec2::new(0.0, -0.25)).y, 600.0);
    }

    #[test]
    fn interior_motion_is_plain_integration() {
        assert_eq!(moved(Vec2::new(100.0, 100.0), Vec2::new(0.25, -0.25)), Vec2::new(100.25, 99.75));
    }

    #[test]
    fn link_cutoff_is_exclusive() {
        assert_eq!(link_alpha(150.0, 150.0, 0.15), None);
        assert_eq!(link_alpha(400.0, 150.0, 0.15), None);
    }

    #[test]
    fn link_is_strongest_at_zero() {
        assert_eq!(link_alpha(0.0, 150.0, 0.15), Some(0.15));
    }

    #[test]
    fn link_fades_with_distance() {
        let near = link_alpha(75.0, 150.0, 0.15).unwrap();
        let far = link_alpha(149.0, 150.0, 0.15).unwrap();
        assert!(near > far && far > 0.0);
    }

    proptest! {
        #[test]
        fn stays_on_surface(
            x in 0.0f32..=800.0, y in 0.0f32..=600.0,
            vx in -0.25f32..=0.25, vy in -0.25f32..=0.25,
        ) {
            let p = moved(Vec2::new(x, y), Vec2::new(vx, vy));
            prop_assert!((0.0..=BOUNDS.x).contains(&p.x));
            prop_assert!((0.0..=BOUNDS.y).contains(&p.y));
        }

        #[test]
        fn link_alpha_is_monotonic(a in 0.0f32..150.0, b in 0.0f32..150.0) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(link_alpha(near, 150.0, 0.15) >= link_alpha(far, 150.0, 0.15));
        }
    }
}
