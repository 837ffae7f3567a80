use glam::Vec2;
use rand::Rng;

/// Background star; purely decorative but advanced by the simulation
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    /// Fall speed in px/s
    pub speed: f32,
    /// 1 or 2 pixels
    pub size: u8,
}

impl Star {
    pub fn random<R: Rng + ?Sized>(view_w: f32, view_h: f32, rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(rng.random_range(0.0..view_w), rng.random_range(0.0..view_h)),
            speed: rng.random_range(7.0..47.0),
            size: if rng.random::<f32>() < 0.85 { 1 } else { 2 },
        }
    }

    /// Fall; wrap to the top at a fresh column after leaving the bottom.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, view_w: f32, view_h: f32, rng: &mut R) {
        self.pos.y += self.speed * dt;
        if self.pos.y > view_h {
            self.pos.y = 0.0;
            self.pos.x = rng.random_range(0.0..view_w);
        }
    }
}

pub fn create_star_field<R: Rng + ?Sized>(
    count: usize,
    view_w: f32,
    view_h: f32,
    rng: &mut R,
) -> Vec<Star> {
    (0..count).map(|_| Star::random(view_w, view_h, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_star_field_in_view() {
        let mut rng = Pcg32::seed_from_u64(3);
        let stars = create_star_field(120, 224.0, 288.0, &mut rng);
        assert_eq!(stars.len(), 120);
        for star in &stars {
            assert!(star.pos.x >= 0.0 && star.pos.x < 224.0);
            assert!(star.pos.y >= 0.0 && star.pos.y < 288.0);
            assert!(star.size == 1 || star.size == 2);
        }
    }

    #[test]
    fn test_star_wraps_to_top() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut star = Star {
            pos: Vec2::new(10.0, 287.0),
            speed: 40.0,
            size: 1,
        };
        star.update(0.1, 224.0, 288.0, &mut rng);
        assert_eq!(star.pos.y, 0.0);
        assert!(star.pos.x >= 0.0 && star.pos.x < 224.0);
    }
}
