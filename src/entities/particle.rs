use glam::Vec2;
use rand::Rng;

/// Downward acceleration applied to explosion debris
pub const PARTICLE_GRAVITY: f32 = 120.0;

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left to live
    pub life: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: f32) -> Self {
        Self { pos, vel, life }
    }

    pub fn update(&mut self, dt: f32) {
        self.life -= dt;
        self.pos += self.vel * dt;
        self.vel.y += PARTICLE_GRAVITY * dt;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Creates a burst of `count` particles flying out of `center`
pub fn create_explosion_particles<R: Rng + ?Sized>(
    center: Vec2,
    count: usize,
    rng: &mut R,
) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            Particle::new(
                center,
                Vec2::new(rng.random_range(-70.0..70.0), rng.random_range(-90.0..30.0)),
                rng.random_range(0.25..0.5),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particle_update_position() {
        let mut particle = Particle::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, -10.0), 0.5);
        particle.update(0.1);
        assert!((particle.pos.x - 12.0).abs() < 1e-5);
        assert!((particle.pos.y - 9.0).abs() < 1e-5);
        assert!((particle.vel.y - 2.0).abs() < 1e-4);
        assert!((particle.life - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_particle_lifetime_expires() {
        let mut particle = Particle::new(Vec2::ZERO, Vec2::ZERO, 0.2);
        particle.update(0.1);
        assert!(!particle.is_dead());
        particle.update(0.1);
        assert!(particle.is_dead());
    }

    #[test]
    fn test_create_explosion_particles() {
        let mut rng = Pcg32::seed_from_u64(7);
        let center = Vec2::new(40.0, 60.0);
        let particles = create_explosion_particles(center, 12, &mut rng);
        assert_eq!(particles.len(), 12);
        for particle in &particles {
            assert_eq!(particle.pos, center);
            assert!(particle.life >= 0.25 && particle.life < 0.5);
            assert!(particle.vel.x >= -70.0 && particle.vel.x < 70.0);
            assert!(particle.vel.y >= -90.0 && particle.vel.y < 30.0);
        }
    }
}
