//! Two-bone inverse kinematics for leg placement

use scrim_core::Vec2;

/// Margin keeping the target strictly inside the solvable reach band.
const REACH_EPSILON: f32 = 0.01;

/// Angles for a solved two-bone chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IkSolution {
    /// World angle of the first segment (hip).
    pub root_angle: f32,
    /// Bend of the second segment relative to the first (knee),
    /// `π − interior angle`; 0 when the chain is straight.
    pub bend_angle: f32,
}

/// Solve a two-bone chain from `origin` toward `target`.
///
/// The target distance is clamped to `[|l1−l2|+ε, l1+l2−ε]` so the
/// triangle is always solvable; out-of-reach targets never error. The
/// root angle is the direction to the target minus the interior angle
/// at the root (law of cosines).
pub fn solve_two_bone(origin: Vec2, target: Vec2, l1: f32, l2: f32) -> IkSolution {
    let to_target = target - origin;
    let min_reach = (l1 - l2).abs() + REACH_EPSILON;
    let max_reach = (l1 + l2 - REACH_EPSILON).max(min_reach);
    let dist = to_target.length().clamp(min_reach, max_reach);

    let target_angle = to_target.angle();

    // Interior angle at the root between (root → target) and (root → joint)
    let cos_root = ((l1 * l1 + dist * dist - l2 * l2) / (2.0 * l1 * dist)).clamp(-1.0, 1.0);
    let root_angle = target_angle - cos_root.acos();

    // Interior angle at the middle joint; the bend is its supplement
    let cos_mid = ((l1 * l1 + l2 * l2 - dist * dist) / (2.0 * l1 * l2)).clamp(-1.0, 1.0);
    let bend_angle = std::f32::consts::PI - cos_mid.acos();

    IkSolution {
        root_angle,
        bend_angle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Forward-kinematics reconstruction of the chain end point.
    fn reconstruct(origin: Vec2, sol: IkSolution, l1: f32, l2: f32) -> Vec2 {
        let mid = origin + Vec2::from_angle(sol.root_angle) * l1;
        mid + Vec2::from_angle(sol.root_angle + sol.bend_angle) * l2
    }

    fn clamped_target(origin: Vec2, target: Vec2, l1: f32, l2: f32) -> Vec2 {
        let min = (l1 - l2).abs() + REACH_EPSILON;
        let max = (l1 + l2 - REACH_EPSILON).max(min);
        let to = target - origin;
        origin + Vec2::from_angle(to.angle()) * to.length().clamp(min, max)
    }

    #[test]
    fn reconstructs_reachable_target() {
        let origin = Vec2::new(100.0, 200.0);
        let target = Vec2::new(112.0, 228.0);
        let l = 20.0;
        let sol = solve_two_bone(origin, target, l, l);
        let foot = reconstruct(origin, sol, l, l);
        assert!(foot.distance(target) < 1e-3, "foot {foot:?}");
    }

    #[test]
    fn out_of_reach_target_clamps_not_panics() {
        let origin = Vec2::ZERO;
        let target = Vec2::new(500.0, 0.0);
        let l = 20.0;
        let sol = solve_two_bone(origin, target, l, l);
        let foot = reconstruct(origin, sol, l, l);
        let expected = clamped_target(origin, target, l, l);
        assert!(foot.distance(expected) < 1e-3);
        assert!(sol.bend_angle.abs() < 0.1, "nearly straight leg");
    }

    #[test]
    fn degenerate_near_origin_target_clamps_to_min_reach() {
        let origin = Vec2::ZERO;
        let target = Vec2::new(0.0, 0.001);
        let l = 20.0;
        let sol = solve_two_bone(origin, target, l, l);
        let foot = reconstruct(origin, sol, l, l);
        // Fully folded chain: foot ends up at minimum reach from origin
        assert!((foot.distance(origin) - REACH_EPSILON).abs() < 1e-3);
        assert!((sol.bend_angle - std::f32::consts::PI).abs() < 0.1);
    }

    #[test]
    fn reconstruction_sweep() {
        let origin = Vec2::new(0.0, 0.0);
        let l = 20.0;
        for i in 0..24 {
            let angle = i as f32 * 0.26;
            let dist = 5.0 + (i as f32) * 1.5;
            let target = origin + Vec2::from_angle(angle) * dist;
            let sol = solve_two_bone(origin, target, l, l);
            let foot = reconstruct(origin, sol, l, l);
            let expected = clamped_target(origin, target, l, l);
            assert!(
                foot.distance(expected) < 1e-2,
                "angle {angle} dist {dist}: {foot:?} vs {expected:?}"
            );
        }
    }
}
