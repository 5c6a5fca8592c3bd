//! Time base and looping action for one clip bound to one skeleton.

use tracing::{debug, warn};

use crate::clip::{AnimationClip, Skeleton, TrackProperty, TrackValue};

/// A clip instance with its own local time. Loops forever while running.
#[derive(Debug, Clone)]
pub struct ClipAction {
    clip: AnimationClip,
    time: f32,
    running: bool,
}

impl ClipAction {
    pub fn new(clip: AnimationClip) -> Self {
        Self {
            clip,
            time: 0.0,
            running: false,
        }
    }

    /// Starts running from the current local time.
    pub fn play(&mut self) {
        self.running = true;
    }

    /// Halts and rewinds to the start of the clip.
    pub fn stop(&mut self) {
        self.running = false;
        self.time = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Local time within the clip, in `[0, duration)`.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    fn advance(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        let duration = self.clip.duration;
        self.time = if duration > 0.0 {
            (self.time + dt).rem_euclid(duration)
        } else {
            0.0
        };
    }
}

/// One bone property sampled from the running action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonePose {
    /// Index into [`Skeleton::joints`].
    pub joint: usize,
    pub property: TrackProperty,
    pub value: TrackValue,
}

/// Drives a single [`ClipAction`] against a skeleton.
#[derive(Debug, Clone)]
pub struct AnimationMixer {
    time: f32,
    action: ClipAction,
    /// (track index, joint index) for every track whose bone exists.
    bindings: Vec<(usize, usize)>,
}

impl AnimationMixer {
    /// Binds every track of `clip` to the joint of the same name. Tracks with
    /// no matching joint are kept in the clip but never sampled.
    pub fn new(skeleton: &Skeleton, clip: AnimationClip) -> Self {
        let bindings: Vec<(usize, usize)> = clip
            .tracks
            .iter()
            .enumerate()
            .filter_map(|(ti, track)| skeleton.joint_index(&track.name).map(|ji| (ti, ji)))
            .collect();

        let unbound = clip.tracks.len() - bindings.len();
        if unbound > 0 {
            warn!(
                "{unbound} of {} tracks in '{}' have no matching bone",
                clip.tracks.len(),
                clip.name
            );
        }
        debug!("Mixer bound {} tracks of '{}'", bindings.len(), clip.name);

        Self {
            time: 0.0,
            action: ClipAction::new(clip),
            bindings,
        }
    }

    /// Moves the mixer time base forward and, if the action runs, its local time.
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
        self.action.advance(dt);
    }

    /// Total time advanced since creation, running or not.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn action(&self) -> &ClipAction {
        &self.action
    }

    pub fn action_mut(&mut self) -> &mut ClipAction {
        &mut self.action
    }

    /// Number of tracks that drive a skeleton joint.
    pub fn bound_tracks(&self) -> usize {
        self.bindings.len()
    }

    /// Bone transforms at the action's local time. Empty while stopped, which
    /// leaves the skeleton in its rest pose.
    pub fn pose(&self) -> Vec<BonePose> {
        if !self.action.running {
            return Vec::new();
        }
        let tracks = &self.action.clip.tracks;
        self.bindings
            .iter()
            .filter_map(|&(ti, joint)| {
                let track = &tracks[ti];
                track.sample(self.action.time).map(|value| BonePose {
                    joint,
                    property: track.property,
                    value,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Keyframes, Track};
    use glam::Vec3;

    fn clip() -> AnimationClip {
        AnimationClip::new(
            "walk",
            vec![
                Track {
                    name: "Hips".to_string(),
                    property: TrackProperty::Translation,
                    times: vec![0.0, 1.0],
                    values: Keyframes::Vec3(vec![Vec3::ZERO, Vec3::Y]),
                },
                Track {
                    name: "Tail".to_string(),
                    property: TrackProperty::Translation,
                    times: vec![0.0, 1.0],
                    values: Keyframes::Vec3(vec![Vec3::ZERO, Vec3::X]),
                },
            ],
        )
    }

    fn skeleton() -> Skeleton {
        Skeleton::new(vec!["Root".into(), "Hips".into()])
    }

    #[test]
    fn test_binds_by_name() {
        let mixer = AnimationMixer::new(&skeleton(), clip());
        assert_eq!(mixer.bound_tracks(), 1);
    }

    #[test]
    fn test_stopped_action_keeps_local_time() {
        let mut mixer = AnimationMixer::new(&skeleton(), clip());
        mixer.advance(0.25);
        mixer.advance(0.25);
        assert!((mixer.time() - 0.5).abs() < 1e-6);
        assert_eq!(mixer.action().time(), 0.0);
        assert!(mixer.pose().is_empty());
    }

    #[test]
    fn test_running_action_wraps_around() {
        let mut mixer = AnimationMixer::new(&skeleton(), clip());
        mixer.action_mut().play();
        for _ in 0..5 {
            mixer.advance(0.25);
        }
        // 1.25 s into a 1 s loop.
        assert!((mixer.action().time() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_play_resumes_and_stop_rewinds() {
        let mut mixer = AnimationMixer::new(&skeleton(), clip());
        mixer.action_mut().play();
        mixer.advance(0.5);
        mixer.action_mut().play();
        assert!((mixer.action().time() - 0.5).abs() < 1e-6);

        mixer.action_mut().stop();
        assert!(!mixer.action().is_running());
        assert_eq!(mixer.action().time(), 0.0);
    }

    #[test]
    fn test_pose_samples_bound_tracks() {
        let mut mixer = AnimationMixer::new(&skeleton(), clip());
        mixer.action_mut().play();
        mixer.advance(0.5);
        let pose = mixer.pose();
        assert_eq!(pose.len(), 1);
        assert_eq!(pose[0].joint, 1);
        match pose[0].value {
            TrackValue::Vec3(v) => assert!((v - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-5),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_zero_length_clip_stays_at_zero() {
        let mut action = ClipAction::new(AnimationClip::new("still", vec![]));
        action.play();
        action.advance(1.0 / 60.0);
        assert_eq!(action.time(), 0.0);
    }
}
