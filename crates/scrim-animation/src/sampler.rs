//! Pure keyframe evaluation — binary search + interpolation

use crate::clip::{Interpolation, Track};

/// Sample a track at a given time (ms), returning the interpolated value.
///
/// Before the first keyframe the first value is used; after the last
/// keyframe the last value is used; between two keyframes the value is
/// interpolated by fractional position. Returns `None` for empty tracks.
pub fn sample_track(track: &Track, time: f32) -> Option<f32> {
    let keyframes = &track.keyframes;

    let first = keyframes.first()?;
    if time <= first.time {
        return Some(first.value);
    }

    let last = keyframes.last()?;
    if time >= last.time {
        return Some(last.value);
    }

    // Binary search for the interval containing `time`
    let idx = match keyframes.binary_search_by(|kf| kf.time.partial_cmp(&time).unwrap()) {
        Ok(i) => return Some(keyframes[i].value), // exact match
        Err(i) => i, // insertion point — time is between [i-1] and [i]
    };

    let prev = &keyframes[idx - 1];
    let next = &keyframes[idx];

    let span = next.time - prev.time;
    if span <= 0.0 {
        return Some(prev.value);
    }
    let t = (time - prev.time) / span;

    match track.interpolation {
        Interpolation::Step => Some(prev.value),
        Interpolation::Linear => Some(prev.value + (next.value - prev.value) * t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Keyframe, Track};
    use crate::pose::Joint;

    fn make_track(interp: Interpolation, keyframes: Vec<(f32, f32)>) -> Track {
        Track {
            joint: Joint::LeftShoulder,
            interpolation: interp,
            keyframes: keyframes
                .into_iter()
                .map(|(time, value)| Keyframe { time, value })
                .collect(),
        }
    }

    #[test]
    fn empty_track_samples_none() {
        let track = make_track(Interpolation::Linear, vec![]);
        assert_eq!(sample_track(&track, 100.0), None);
    }

    #[test]
    fn before_first_keyframe_clamps() {
        let track = make_track(Interpolation::Linear, vec![(100.0, 0.5), (200.0, 1.0)]);
        assert_eq!(sample_track(&track, 0.0), Some(0.5));
    }

    #[test]
    fn after_last_keyframe_clamps() {
        let track = make_track(Interpolation::Linear, vec![(0.0, 0.5), (200.0, 1.0)]);
        assert_eq!(sample_track(&track, 500.0), Some(1.0));
    }

    #[test]
    fn linear_midpoint() {
        let track = make_track(Interpolation::Linear, vec![(0.0, 0.0), (200.0, 1.0)]);
        let v = sample_track(&track, 100.0).unwrap();
        assert!((v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn exact_keyframe_time() {
        let track = make_track(
            Interpolation::Linear,
            vec![(0.0, 0.0), (100.0, 0.7), (200.0, 1.0)],
        );
        assert_eq!(sample_track(&track, 100.0), Some(0.7));
    }

    #[test]
    fn step_holds_previous() {
        let track = make_track(Interpolation::Step, vec![(0.0, 0.1), (100.0, 0.9)]);
        assert_eq!(sample_track(&track, 50.0), Some(0.1));
    }

    #[test]
    fn sampling_is_idempotent() {
        let track = make_track(Interpolation::Linear, vec![(0.0, -0.2), (500.0, 0.2)]);
        let a = sample_track(&track, 130.0);
        let b = sample_track(&track, 130.0);
        assert_eq!(a, b);
    }
}
