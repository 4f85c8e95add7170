//! Arena bounds and vertical motion integration
//!
//! All integration runs on raw millisecond deltas: velocities are px/ms
//! and gravity is px/ms², matching the tuning table.

use scrim_core::{Result, ScrimError, Vec2};

/// The playfield: a width/height in pixels with the ground line at the
/// bottom edge (canvas coordinates, +y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ScrimError::InvalidGeometry(format!(
                "arena dimensions must be finite and positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Y of the ground line.
    pub fn ground_y(&self) -> f32 {
        self.height
    }

    /// Ground line for an entity whose position is its center.
    pub fn floor_for(&self, half_height: f32) -> f32 {
        self.height - half_height
    }

    /// Clamp a center x so the entity stays inside the arena.
    pub fn clamp_horizontal(&self, x: f32, half_width: f32) -> f32 {
        x.clamp(half_width, self.width - half_width)
    }
}

/// Explicit Euler step: gravity into vertical velocity, velocity into
/// position.
pub fn integrate_motion(position: &mut Vec2, velocity: &mut Vec2, gravity: f32, dt_ms: f32) {
    velocity.y += gravity * dt_ms;
    position.x += velocity.x * dt_ms;
    position.y += velocity.y * dt_ms;
}

/// Clamp to the floor line. Returns true when the entity is resting on
/// the ground after this step (vertical velocity zeroed on contact).
pub fn resolve_ground(position: &mut Vec2, velocity: &mut Vec2, floor_y: f32) -> bool {
    if position.y >= floor_y {
        position.y = floor_y;
        if velocity.y > 0.0 {
            velocity.y = 0.0;
        }
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_rejects_bad_dimensions() {
        assert!(Arena::new(0.0, 450.0).is_err());
        assert!(Arena::new(800.0, f32::NAN).is_err());
        assert!(Arena::new(800.0, 450.0).is_ok());
    }

    #[test]
    fn gravity_accumulates_into_velocity() {
        let mut pos = Vec2::new(0.0, 0.0);
        let mut vel = Vec2::new(0.0, 0.0);
        integrate_motion(&mut pos, &mut vel, 0.001, 16.0);
        assert!((vel.y - 0.016).abs() < 1e-6);
        assert!((pos.y - 0.016 * 16.0).abs() < 1e-5);
    }

    #[test]
    fn falling_entity_lands_on_floor() {
        let arena = Arena::new(800.0, 450.0).unwrap();
        let floor = arena.floor_for(32.0);
        let mut pos = Vec2::new(100.0, floor + 10.0);
        let mut vel = Vec2::new(0.0, 0.5);

        assert!(resolve_ground(&mut pos, &mut vel, floor));
        assert_eq!(pos.y, floor);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn airborne_entity_not_grounded() {
        let mut pos = Vec2::new(100.0, 50.0);
        let mut vel = Vec2::new(0.0, -0.1);
        assert!(!resolve_ground(&mut pos, &mut vel, 418.0));
        assert_eq!(vel.y, -0.1);
    }

    #[test]
    fn horizontal_clamp_keeps_entity_inside() {
        let arena = Arena::new(800.0, 450.0).unwrap();
        assert_eq!(arena.clamp_horizontal(-50.0, 16.0), 16.0);
        assert_eq!(arena.clamp_horizontal(900.0, 16.0), 784.0);
        assert_eq!(arena.clamp_horizontal(400.0, 16.0), 400.0);
    }
}
