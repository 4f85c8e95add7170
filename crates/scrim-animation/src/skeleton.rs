//! Runtime skeleton — indexed bone arena with a single FK pass
//!
//! Bones are stored in topological order (parents before children), so
//! one forward pass recomputes every world transform. World positions
//! must not be read before `update()` has run in the current frame.

use scrim_core::Vec2;

/// Handle to a bone inside a [`Skeleton`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoneId(usize);

#[derive(Clone, Copy, Debug)]
struct Bone {
    length: f32,
    local_angle: f32,
    parent: Option<usize>,
    world_angle: f32,
    start: Vec2,
    end: Vec2,
}

/// A bone hierarchy owned by one fighter.
#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bone. The first bone added must be the root (`parent`
    /// = `None`); children always reference an earlier bone, keeping
    /// the arena in topological order by construction.
    pub fn add_bone(&mut self, length: f32, parent: Option<BoneId>) -> BoneId {
        debug_assert!(
            parent.map_or(self.bones.is_empty(), |p| p.0 < self.bones.len()),
            "bone parents must be added before their children"
        );
        let id = BoneId(self.bones.len());
        self.bones.push(Bone {
            length,
            local_angle: 0.0,
            parent: parent.map(|p| p.0),
            world_angle: 0.0,
            start: Vec2::ZERO,
            end: Vec2::ZERO,
        });
        id
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn set_local_angle(&mut self, id: BoneId, angle: f32) {
        self.bones[id.0].local_angle = angle;
    }

    pub fn local_angle(&self, id: BoneId) -> f32 {
        self.bones[id.0].local_angle
    }

    /// Recompute world transforms root-to-leaf.
    ///
    /// The root starts at `origin` with parent angle 0; each bone's
    /// world angle is its parent's world angle plus its local angle,
    /// and its end point extends `length` along that angle. Children
    /// start at their parent's end point.
    pub fn update(&mut self, origin: Vec2) {
        for i in 0..self.bones.len() {
            let (start, parent_angle) = match self.bones[i].parent {
                Some(p) => (self.bones[p].end, self.bones[p].world_angle),
                None => (origin, 0.0),
            };
            let bone = &mut self.bones[i];
            bone.world_angle = parent_angle + bone.local_angle;
            bone.start = start;
            bone.end = start + Vec2::from_angle(bone.world_angle) * bone.length;
        }
    }

    pub fn world_angle(&self, id: BoneId) -> f32 {
        self.bones[id.0].world_angle
    }

    pub fn start(&self, id: BoneId) -> Vec2 {
        self.bones[id.0].start
    }

    pub fn end(&self, id: BoneId) -> Vec2 {
        self.bones[id.0].end
    }
}
