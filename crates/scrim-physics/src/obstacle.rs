//! Static obstacles and their registry
//!
//! Obstacles validate their geometry at construction and live in an
//! owned [`ObstacleField`] (no module-level arrays), queried by the
//! movement layer, the AI, and obstacle-interaction logic.

use scrim_core::{Rect, Result, ScrimError, Vec2};
use serde::{Deserialize, Serialize};

/// Obstacle category, advisory metadata for AI and interaction logic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    #[default]
    Static,
    Platform,
    Wall,
}

/// Construction parameters for an obstacle.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub kind: ObstacleKind,
    #[serde(default)]
    pub climbable: bool,
    #[serde(default)]
    pub destructible: bool,
    #[serde(default)]
    pub jumpable: bool,
}

/// A static rectangular obstacle (platform, wall, crate).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    pub kind: ObstacleKind,
    pub climbable: bool,
    pub destructible: bool,
    pub jumpable: bool,
}

impl Obstacle {
    fn from_spec(id: u32, spec: ObstacleSpec) -> Result<Self> {
        for (field, value) in [
            ("x", spec.x),
            ("y", spec.y),
            ("width", spec.width),
            ("height", spec.height),
        ] {
            if !value.is_finite() {
                return Err(ScrimError::InvalidGeometry(format!(
                    "obstacle {field} must be a finite number, got {value}"
                )));
            }
        }
        if spec.width <= 0.0 || spec.height <= 0.0 {
            return Err(ScrimError::InvalidGeometry(format!(
                "obstacle dimensions must be positive, got {}x{}",
                spec.width, spec.height
            )));
        }
        Ok(Self {
            id,
            rect: Rect::new(spec.x, spec.y, spec.width, spec.height),
            kind: spec.kind,
            climbable: spec.climbable,
            destructible: spec.destructible,
            jumpable: spec.jumpable,
        })
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        self.rect.contains_point(p)
    }

    pub fn overlaps(&self, rect: &Rect) -> bool {
        self.rect.overlaps(rect)
    }

    /// Detailed description for AI decisions and diagnostics.
    pub fn describe(&self) -> ObstacleInfo {
        ObstacleInfo {
            id: self.id,
            kind: self.kind,
            rect: self.rect,
            top: self.rect.y,
            bottom: self.rect.y + self.rect.height,
            left: self.rect.x,
            right: self.rect.x + self.rect.width,
            center: self.rect.center(),
            area: self.rect.width * self.rect.height,
            is_wide: self.rect.width > self.rect.height,
            climbable: self.climbable,
            destructible: self.destructible,
            jumpable: self.jumpable,
        }
    }
}

/// Snapshot of an obstacle's geometry and affordances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleInfo {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
    pub center: Vec2,
    pub area: f32,
    pub is_wide: bool,
    pub climbable: bool,
    pub destructible: bool,
    pub jumpable: bool,
}

/// Owns every obstacle in a match.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add an obstacle, returning its id.
    pub fn add(&mut self, spec: ObstacleSpec) -> Result<u32> {
        let id = self.next_id;
        let obstacle = Obstacle::from_spec(id, spec)?;
        self.next_id += 1;
        self.obstacles.push(obstacle);
        Ok(id)
    }

    /// Remove an obstacle by id, returning it if present.
    pub fn remove(&mut self, id: u32) -> Option<Obstacle> {
        let idx = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.remove(idx))
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// First obstacle overlapping the rect, if any.
    pub fn collision(&self, rect: &Rect) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.overlaps(rect))
    }

    /// First obstacle containing the point, if any.
    pub fn at_point(&self, p: Vec2) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.contains_point(p))
    }

    /// All obstacles overlapping the rect.
    pub fn in_rect(&self, rect: &Rect) -> Vec<&Obstacle> {
        self.obstacles.iter().filter(|o| o.overlaps(rect)).collect()
    }

    pub fn describe_all(&self) -> Vec<ObstacleInfo> {
        self.obstacles.iter().map(Obstacle::describe).collect()
    }
}
