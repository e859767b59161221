//! Static star field drawn behind everything else

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::entity::{Bounds, Field, GameObject, Lifecycle, SimRng};
use crate::renderer::{Rgba, Surface};

const STAR_TINTS: [Rgba; 3] = [
    Rgba::rgb(255, 255, 255),
    Rgba::rgb(128, 0, 128),
    Rgba::rgb(34, 34, 153),
];

#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone)]
pub struct StarBackground {
    pub stars: Vec<Star>,
    pub active: bool,
    field: Field,
}

impl StarBackground {
    pub fn new(field: Field, count: usize, rng: &mut SimRng) -> Self {
        let stars = (0..count)
            .map(|_| {
                let tint = STAR_TINTS.choose(rng).copied().unwrap_or(Rgba::WHITE);
                Star {
                    pos: Vec2::new(
                        rng.random_range(0.0..=field.width.max(0.0)).floor(),
                        rng.random_range(0.0..=field.height.max(0.0)).floor(),
                    ),
                    size: rng.random_range(1.0f32..2.0).floor(),
                    color: tint.with_alpha(rng.random_range(0.1..1.0)),
                }
            })
            .collect();

        Self {
            stars,
            active: true,
            field,
        }
    }
}

impl GameObject for StarBackground {
    fn position(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn bounding_box(&self) -> Bounds {
        Bounds::from_rect(0.0, 0.0, self.field.width, self.field.height)
    }

    fn update(&mut self, _dt: f32, field: &Field, _rng: &mut SimRng) -> Lifecycle {
        self.field = *field;
        Lifecycle::Keep
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.save();
        for star in &self.stars {
            surface.set_fill_color(star.color);
            surface.fill_rect(star.pos.x, star.pos.y, star.size, star.size);
        }
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, Recorder};
    use rand::SeedableRng;

    #[test]
    fn test_stars_inside_field() {
        let field = Field::new(320.0, 200.0);
        let mut rng = SimRng::seed_from_u64(9);
        let bg = StarBackground::new(field, 300, &mut rng);
        assert_eq!(bg.stars.len(), 300);
        for star in &bg.stars {
            assert!(field.contains(star.pos));
            assert_eq!(star.size, 1.0);
            assert!(star.color.a >= 0.1 && star.color.a < 1.0);
        }
    }

    #[test]
    fn test_zero_sized_field() {
        let mut rng = SimRng::seed_from_u64(9);
        let bg = StarBackground::new(Field::new(0.0, 0.0), 10, &mut rng);
        assert!(bg.stars.iter().all(|s| s.pos == Vec2::ZERO));
    }

    #[test]
    fn test_render_one_rect_per_star() {
        let mut rng = SimRng::seed_from_u64(9);
        let bg = StarBackground::new(Field::default(), 25, &mut rng);
        let mut rec = Recorder::new();
        bg.render(&mut rec);
        assert_eq!(rec.count(|c| matches!(c, DrawCommand::FillRect { .. })), 25);
    }
}
