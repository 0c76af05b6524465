//! Particle network background: drifting dots on a torus, linked when close.
//!
//! Per frame every particle is integrated, wrapped and drawn, then linked to each
//! higher-indexed particle within range. With the count capped at 60 that is at
//! most 1770 distance checks, so no spatial partitioning is needed.

mod particle;
mod rng;
mod surface;

use glam::Vec2;

use crate::api::config::ParticleConfig;
use crate::theme::ThemeFlag;

pub use particle::{link_alpha, wrap, Particle};
pub use rng::Rng;
pub use surface::{Palette, Rgba, Surface};

/// Per-frame counters, mostly for tests and debug logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub links: usize,
}

/// Number of particles for a surface: one per `area_per_particle` px², capped.
pub fn particle_count(size: Vec2, config: &ParticleConfig) -> usize {
    if size.x <= 0.0 || size.y <= 0.0 || config.area_per_particle <= 0.0 {
        return 0;
    }
    let by_area = (size.x * size.y / config.area_per_particle).floor() as usize;
    by_area.min(config.max_particles)
}

pub struct ParticleField {
    particles: Vec<Particle>,
    size: Vec2,
    rng: Rng,
    config: ParticleConfig,
}

impl ParticleField {
    pub fn new(size: Vec2, config: ParticleConfig, seed: u64) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            size: Vec2::ZERO,
            rng: Rng::new(seed),
            config,
        };
        field.resize(size);
        field
    }

    /// Adopt a new surface size and rebuild the particle set from scratch.
    pub fn resize(&mut self, size: Vec2) {
        self.size = size.max(Vec2::ZERO);
        let count = particle_count(self.size, &self.config);
        self.particles.clear();
        for _ in 0..count {
            self.particles
                .push(Particle::random(self.size, &self.config, &mut self.rng));
        }
        log::debug!(
            "particle field {}x{}: {} particles",
            self.size.x,
            self.size.y,
            count
        );
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance one frame and draw it. The palette is chosen from `theme` on
    /// every call, so a theme switch shows up on the very next frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, theme: ThemeFlag, surface: &mut S) -> FrameStats {
        surface.clear(self.size);
        let palette = Palette::for_theme(theme);
        let mut stats = FrameStats {
            particles: self.particles.len(),
            links: 0,
        };

        for i in 0..self.particles.len() {
            self.particles[i].advance(self.size);
            let p = self.particles[i];
            surface.fill_circle(p.pos, p.radius, palette.particle);

            for q in &self.particles[i + 1..] {
                let dist = p.pos.distance(q.pos);
                if let Some(alpha) = link_alpha(dist, self.config.link_distance, self.config.link_alpha) {
                    surface.line(p.pos, q.pos, palette.link.with_alpha(alpha), self.config.line_width);
                    stats.links += 1;
                }
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        circles: Vec<(Vec2, f32, Rgba)>,
        lines: Vec<(Vec2, Vec2, Rgba)>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, _size: Vec2) {
            self.clears += 1;
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
            self.circles.push((center, radius, color));
        }

        fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, _width: f32) {
            self.lines.push((from, to, color));
        }
    }

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 2.0)
    }

    fn field_with(particles: Vec<Particle>) -> ParticleField {
        let mut field = ParticleField::new(Vec2::new(1000.0, 1000.0), ParticleConfig::default(), 1);
        field.particles = particles;
        field
    }

    #[test]
    fn count_scales_with_area_and_caps() {
        let cfg = ParticleConfig::default();
        assert_eq!(particle_count(Vec2::new(800.0, 600.0), &cfg), 32);
        assert_eq!(particle_count(Vec2::new(1920.0, 1080.0), &cfg), 60);
        assert_eq!(particle_count(Vec2::new(100.0, 100.0), &cfg), 0);
        assert_eq!(particle_count(Vec2::ZERO, &cfg), 0);
    }

    #[test]
    fn resize_regenerates_everything() {
        let mut field = ParticleField::new(Vec2::new(1920.0, 1080.0), ParticleConfig::default(), 9);
        assert_eq!(field.particles().len(), 60);
        field.resize(Vec2::new(300.0, 500.0));
        assert_eq!(field.particles().len(), 10);
        assert!(field
            .particles()
            .iter()
            .all(|p| p.pos.x <= 300.0 && p.pos.y <= 500.0));
    }

    #[test]
    fn frame_clears_and_draws_each_particle() {
        let mut field = field_with(vec![still(10.0, 10.0), still(500.0, 500.0)]);
        let mut rec = Recorder::default();
        let stats = field.frame(ThemeFlag::Dark, &mut rec);
        assert_eq!(rec.clears, 1);
        assert_eq!(rec.circles.len(), 2);
        assert_eq!(stats, FrameStats { particles: 2, links: 0 });
    }

    #[test]
    fn close_pairs_are_linked_once() {
        let mut field = field_with(vec![still(0.0, 0.0), still(30.0, 40.0), still(900.0, 900.0)]);
        let mut rec = Recorder::default();
        let stats = field.frame(ThemeFlag::Dark, &mut rec);
        assert_eq!(stats.links, 1);
        let (_, _, color) = rec.lines[0];
        // 50 px apart: (1 - 50/150) * 0.15
        assert!((color.a - 0.1).abs() < 1e-6);
    }

    #[test]
    fn pair_at_cutoff_is_not_linked() {
        let mut field = field_with(vec![still(100.0, 100.0), still(250.0, 100.0)]);
        let mut rec = Recorder::default();
        assert_eq!(field.frame(ThemeFlag::Dark, &mut rec).links, 0);
    }

    #[test]
    fn theme_switch_applies_next_frame() {
        let mut field = field_with(vec![still(10.0, 10.0), still(20.0, 10.0)]);
        let mut rec = Recorder::default();
        field.frame(ThemeFlag::Dark, &mut rec);
        field.frame(ThemeFlag::Light, &mut rec);
        assert_eq!(rec.circles[0].2, Palette::DARK.particle);
        assert_eq!(rec.circles[2].2, Palette::LIGHT.particle);
        assert_eq!(rec.lines[1].2.r, Palette::LIGHT.link.r);
    }

    proptest! {
        #[test]
        fn generated_particles_respect_config(seed in any::<u64>(), w in 200.0f32..3000.0, h in 200.0f32..3000.0) {
            let cfg = ParticleConfig::default();
            let field = ParticleField::new(Vec2::new(w, h), cfg.clone(), seed);
            prop_assert_eq!(field.particles().len(), particle_count(Vec2::new(w, h), &cfg));
            for p in field.particles() {
                prop_assert!(p.pos.x >= 0.0 && p.pos.x <= w);
                prop_assert!(p.pos.y >= 0.0 && p.pos.y <= h);
                prop_assert!(p.vel.x.abs() <= 0.25 && p.vel.y.abs() <= 0.25);
                prop_assert!(p.radius >= 1.0 && p.radius <= 3.0);
            }
        }

        #[test]
        fn particles_never_leave_the_surface(seed in any::<u64>(), frames in 1usize..200) {
            let mut field = ParticleField::new(Vec2::new(640.0, 480.0), ParticleConfig::default(), seed);
            let mut rec = Recorder::default();
            for _ in 0..frames {
                field.frame(ThemeFlag::Dark, &mut rec);
            }
            for p in field.particles() {
                prop_assert!((0.0..=640.0).contains(&p.pos.x));
                prop_assert!((0.0..=480.0).contains(&p.pos.y));
            }
        }
    }
}
