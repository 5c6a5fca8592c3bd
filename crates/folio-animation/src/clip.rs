//! Keyframed animation data and the skeleton it binds to.

use glam::{Quat, Vec3};

/// Which part of a bone's local transform a track drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackProperty {
    Translation,
    Rotation,
    Scale,
}

/// Keyframe values, one per entry in [`Track::times`].
#[derive(Debug, Clone, PartialEq)]
pub enum Keyframes {
    Vec3(Vec<Vec3>),
    Quat(Vec<Quat>),
}

impl Keyframes {
    pub fn len(&self) -> usize {
        match self {
            Keyframes::Vec3(v) => v.len(),
            Keyframes::Quat(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sampled bone transform component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vec3(Vec3),
    Quat(Quat),
}

/// One bone property animated over time.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Bone (node) name the track binds to.
    pub name: String,
    pub property: TrackProperty,
    /// Keyframe times in seconds, ascending.
    pub times: Vec<f32>,
    pub values: Keyframes,
}

impl Track {
    /// Last keyframe time, or zero for an empty track.
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Linear interpolation between the keyframes around `t` (slerp for
    /// rotations). Times before the first or after the last key clamp.
    pub fn sample(&self, t: f32) -> Option<TrackValue> {
        let count = self.times.len().min(self.values.len());
        if count == 0 {
            return None;
        }
        let (i0, i1, f) = if t <= self.times[0] {
            (0, 0, 0.0)
        } else if t >= self.times[count - 1] {
            (count - 1, count - 1, 0.0)
        } else {
            // First key strictly after t; t lies in [times[i1-1], times[i1]).
            let i1 = self.times[..count].partition_point(|&k| k <= t);
            let (t0, t1) = (self.times[i1 - 1], self.times[i1]);
            let span = t1 - t0;
            let f = if span > 0.0 { (t - t0) / span } else { 0.0 };
            (i1 - 1, i1, f)
        };
        Some(match &self.values {
            Keyframes::Vec3(v) => TrackValue::Vec3(v[i0].lerp(v[i1], f)),
            Keyframes::Quat(v) => TrackValue::Quat(v[i0].slerp(v[i1], f)),
        })
    }
}

/// Named collection of tracks with a playback length.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    /// Length in seconds.
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Builds a clip whose duration is the latest keyframe time of any track.
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks.iter().map(Track::end_time).fold(0.0, f32::max);
        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }

    /// Track names in order, for diagnostics.
    pub fn track_names(&self) -> Vec<&str> {
        self.tracks.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Bone names of a skinned model, in joint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skeleton {
    pub joints: Vec<String>,
}

impl Skeleton {
    pub fn new(joints: Vec<String>) -> Self {
        Self { joints }
    }

    pub fn contains(&self, bone: &str) -> bool {
        self.joints.iter().any(|j| j == bone)
    }

    pub fn joint_index(&self, bone: &str) -> Option<usize> {
        self.joints.iter().position(|j| j == bone)
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation_track() -> Track {
        Track {
            name: "Hips".to_string(),
            property: TrackProperty::Translation,
            times: vec![0.0, 1.0, 2.0],
            values: Keyframes::Vec3(vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 0.0)]),
        }
    }

    fn assert_vec3(value: Option<TrackValue>, expected: Vec3) {
        match value {
            Some(TrackValue::Vec3(v)) => assert!((v - expected).length() < 1e-5, "{v} != {expected}"),
            other => panic!("expected Vec3, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_interpolates_linearly() {
        let track = translation_track();
        assert_vec3(track.sample(0.5), Vec3::new(1.0, 0.0, 0.0));
        assert_vec3(track.sample(1.25), Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_sample_hits_keys_exactly() {
        let track = translation_track();
        assert_vec3(track.sample(1.0), Vec3::new(2.0, 0.0, 0.0));
        assert_vec3(track.sample(2.0), Vec3::new(2.0, 4.0, 0.0));
    }

    #[test]
    fn test_sample_clamps_outside_range() {
        let track = translation_track();
        assert_vec3(track.sample(-1.0), Vec3::ZERO);
        assert_vec3(track.sample(10.0), Vec3::new(2.0, 4.0, 0.0));
    }

    #[test]
    fn test_sample_rotation_slerps() {
        let track = Track {
            name: "Spine".to_string(),
            property: TrackProperty::Rotation,
            times: vec![0.0, 1.0],
            values: Keyframes::Quat(vec![Quat::IDENTITY, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)]),
        };
        match track.sample(0.5) {
            Some(TrackValue::Quat(q)) => {
                let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
                assert!(q.dot(expected).abs() > 0.9999);
            }
            other => panic!("expected Quat, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_track_samples_nothing() {
        let track = Track {
            name: "Empty".to_string(),
            property: TrackProperty::Scale,
            times: vec![],
            values: Keyframes::Vec3(vec![]),
        };
        assert_eq!(track.sample(0.3), None);
        assert_eq!(track.end_time(), 0.0);
    }

    #[test]
    fn test_clip_duration_is_longest_track() {
        let mut short = translation_track();
        short.times = vec![0.0, 0.5, 0.75];
        let clip = AnimationClip::new("walk", vec![short, translation_track()]);
        assert_eq!(clip.duration, 2.0);
        assert_eq!(clip.track_names(), vec!["Hips", "Hips"]);
    }

    #[test]
    fn test_skeleton_lookup() {
        let skeleton = Skeleton::new(vec!["Hips".into(), "Spine".into()]);
        assert!(skeleton.contains("Spine"));
        assert_eq!(skeleton.joint_index("Spine"), Some(1));
        assert!(!skeleton.contains("mixamorigSpine"));
        assert_eq!(skeleton.len(), 2);
    }
}
