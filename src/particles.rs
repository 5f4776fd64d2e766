/// Death-burst particles: spawned once on game over, then decayed each frame.

use crate::config::{PARTICLE_DECAY, PARTICLE_GRAVITY, PARTICLE_SHRINK};
use crate::entities::{Particle, PARTICLE_COLORS};
use crate::random::RandomSource;

pub fn create_particles(x: f64, y: f64, count: usize, rng: &mut impl RandomSource) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            x: x + rng.range(-20.0, 20.0),
            y: y + rng.range(-20.0, 20.0),
            velocity_x: (rng.next_unit() - 0.5) * 10.0,
            velocity_y: -(rng.next_unit() * 8.0 + 3.0),
            life: 1.0,
            size: rng.range(3.0, 9.0),
            color: PARTICLE_COLORS[rng.pick(PARTICLE_COLORS.len())],
        })
        .collect()
}

pub fn update_particles(particles: &[Particle]) -> Vec<Particle> {
    particles
        .iter()
        .map(|p| Particle {
            x: p.x + p.velocity_x,
            y: p.y + p.velocity_y,
            velocity_y: p.velocity_y + PARTICLE_GRAVITY,
            life: p.life - PARTICLE_DECAY,
            size: p.size * PARTICLE_SHRINK,
            ..p.clone()
        })
        .filter(|p| p.life > 0.0)
        .collect()
}
