//! Hitbox shapes and limb-segment box construction

use scrim_core::{Circle, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A collision shape: padded AABBs for limb segments and the torso, a
/// circle for the head.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Hitbox {
    Rect(Rect),
    Circle(Circle),
}

impl Hitbox {
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        match (self, other) {
            (Hitbox::Rect(a), Hitbox::Rect(b)) => a.overlaps(b),
            (Hitbox::Rect(r), Hitbox::Circle(c)) | (Hitbox::Circle(c), Hitbox::Rect(r)) => {
                c.overlaps_rect(r)
            }
            (Hitbox::Circle(a), Hitbox::Circle(b)) => {
                a.center.distance(b.center) <= a.radius + b.radius
            }
        }
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        match self {
            Hitbox::Rect(r) => r.contains_point(p),
            Hitbox::Circle(c) => c.contains_point(p),
        }
    }
}

/// Build the padded AABB for a limb segment between two joints.
///
/// Padded boxes never collapse below `2 × padding` in either dimension,
/// so a perfectly vertical or horizontal segment still has width.
pub fn segment_aabb(p1: Vec2, p2: Vec2, padding: f32) -> Rect {
    let mut rect = Rect::from_points(p1, p2).padded(padding);
    let min_dim = 2.0 * padding;
    if rect.width < min_dim {
        rect.width = min_dim;
    }
    if rect.height < min_dim {
        rect.height = min_dim;
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_segment_keeps_minimum_width() {
        let rect = segment_aabb(Vec2::new(10.0, 0.0), Vec2::new(10.0, 20.0), 4.0);
        assert_eq!(rect.width, 8.0);
        assert_eq!(rect.height, 28.0);
    }

    #[test]
    fn segment_order_does_not_matter() {
        let a = segment_aabb(Vec2::new(0.0, 0.0), Vec2::new(10.0, 20.0), 4.0);
        let b = segment_aabb(Vec2::new(10.0, 20.0), Vec2::new(0.0, 0.0), 4.0);
        assert_eq!(a, b);
    }

    #[test]
    fn circle_vs_rect_hitboxes() {
        let head = Hitbox::Circle(Circle::new(Vec2::new(0.0, 0.0), 8.0));
        let near = Hitbox::Rect(Rect::new(5.0, 0.0, 10.0, 10.0));
        let far = Hitbox::Rect(Rect::new(50.0, 50.0, 10.0, 10.0));
        assert!(head.overlaps(&near));
        assert!(!head.overlaps(&far));
    }

    #[test]
    fn circle_circle_overlap() {
        let a = Hitbox::Circle(Circle::new(Vec2::new(0.0, 0.0), 5.0));
        let b = Hitbox::Circle(Circle::new(Vec2::new(8.0, 0.0), 5.0));
        let c = Hitbox::Circle(Circle::new(Vec2::new(20.0, 0.0), 5.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
