//! Walk-cycle coordinator fed by asset events and the avatar's velocity.

use glam::Vec3;
use tracing::{debug, info};

use crate::clip::{AnimationClip, Skeleton};
use crate::mixer::AnimationMixer;
use crate::playback::{PlaybackState, update_playback};
use crate::retarget::retarget_clip;

/// Starts and stops the walk clip from the avatar's speed.
///
/// The skeleton and clip may arrive in either order. Once both are present the
/// clip is retargeted once and bound into an [`AnimationMixer`]; before that,
/// [`update`](Self::update) does nothing.
#[derive(Debug, Clone)]
pub struct WalkAnimator {
    skeleton: Option<Skeleton>,
    clip: Option<AnimationClip>,
    mixer: Option<AnimationMixer>,
    state: PlaybackState,
    threshold: f32,
    mixer_delta: f32,
    prefix: String,
}

impl WalkAnimator {
    /// `threshold` is the speed above which the walk plays; `mixer_delta` is
    /// the fixed time the mixer advances per frame.
    pub fn new(threshold: f32, mixer_delta: f32, prefix: impl Into<String>) -> Self {
        Self {
            skeleton: None,
            clip: None,
            mixer: None,
            state: PlaybackState::Stopped,
            threshold,
            mixer_delta,
            prefix: prefix.into(),
        }
    }

    /// Provide the avatar's skeleton. Ignored once the mixer exists.
    pub fn set_skeleton(&mut self, skeleton: Skeleton) {
        if self.mixer.is_some() {
            return;
        }
        self.skeleton = Some(skeleton);
        self.try_build();
    }

    /// Provide the walk clip. Ignored once the mixer exists.
    pub fn set_clip(&mut self, clip: AnimationClip) {
        if self.mixer.is_some() {
            return;
        }
        self.clip = Some(clip);
        self.try_build();
    }

    fn try_build(&mut self) {
        let (Some(skeleton), Some(clip)) = (&self.skeleton, &self.clip) else {
            return;
        };
        debug!("Walk clip tracks before retarget: {:?}", clip.track_names());
        let (fixed, renamed) = retarget_clip(clip, &self.prefix);
        debug!("Walk clip tracks after retarget: {:?}", fixed.track_names());
        let mixer = AnimationMixer::new(skeleton, fixed);
        info!(
            "Walk animation ready ({renamed} bones renamed, {} bound)",
            mixer.bound_tracks()
        );
        self.mixer = Some(mixer);
        self.clip = None;
    }

    /// Whether the mixer has been built.
    pub fn is_ready(&self) -> bool {
        self.mixer.is_some()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Takes effect from the next [`update`](Self::update); playback state is kept.
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    pub fn mixer(&self) -> Option<&AnimationMixer> {
        self.mixer.as_ref()
    }

    /// One frame. `avatar_velocity` is `None` while no avatar body exists.
    ///
    /// Updates playback from the velocity magnitude, then advances the mixer
    /// by the fixed delta whether or not the walk is playing.
    pub fn update(&mut self, avatar_velocity: Option<Vec3>) -> PlaybackState {
        let (Some(mixer), Some(velocity)) = (self.mixer.as_mut(), avatar_velocity) else {
            return self.state;
        };

        let next = update_playback(velocity.length(), self.threshold, self.state);
        if next != self.state {
            match next {
                PlaybackState::Playing => mixer.action_mut().play(),
                PlaybackState::Stopped => mixer.action_mut().stop(),
            }
            debug!("Walk {:?} -> {:?}", self.state, next);
            self.state = next;
        }

        mixer.advance(self.mixer_delta);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Keyframes, Track, TrackProperty};
    use crate::retarget::DEFAULT_RETARGET_PREFIX;

    const DT: f32 = 1.0 / 60.0;

    fn skeleton() -> Skeleton {
        Skeleton::new(vec!["Hips".into(), "Spine".into()])
    }

    fn clip() -> AnimationClip {
        AnimationClip::new(
            "walk",
            vec![Track {
                name: "mixamorigHips".to_string(),
                property: TrackProperty::Translation,
                times: vec![0.0, 1.0],
                values: Keyframes::Vec3(vec![Vec3::ZERO, Vec3::Y]),
            }],
        )
    }

    fn animator() -> WalkAnimator {
        WalkAnimator::new(0.1, DT, DEFAULT_RETARGET_PREFIX)
    }

    #[test]
    fn test_noop_until_both_assets_arrive() {
        let mut walk = animator();
        assert_eq!(walk.update(Some(Vec3::new(5.0, 0.0, 0.0))), PlaybackState::Stopped);
        walk.set_skeleton(skeleton());
        assert!(!walk.is_ready());
        assert_eq!(walk.update(Some(Vec3::new(5.0, 0.0, 0.0))), PlaybackState::Stopped);
    }

    #[test]
    fn test_clip_first_then_skeleton() {
        let mut walk = animator();
        walk.set_clip(clip());
        walk.set_skeleton(skeleton());
        assert!(walk.is_ready());
        // Retargeted track binds to "Hips".
        assert_eq!(walk.mixer().map(|m| m.bound_tracks()), Some(1));
    }

    #[test]
    fn test_plays_and_stops_with_speed() {
        let mut walk = animator();
        walk.set_skeleton(skeleton());
        walk.set_clip(clip());

        assert_eq!(walk.update(Some(Vec3::new(-9.6, 0.0, -9.6))), PlaybackState::Playing);
        assert!(walk.mixer().is_some_and(|m| m.action().is_running()));
        assert_eq!(walk.update(Some(Vec3::ZERO)), PlaybackState::Stopped);
        assert!(walk.mixer().is_some_and(|m| !m.action().is_running()));
    }

    #[test]
    fn test_mixer_advances_while_stopped() {
        let mut walk = animator();
        walk.set_skeleton(skeleton());
        walk.set_clip(clip());
        for _ in 0..3 {
            walk.update(Some(Vec3::ZERO));
        }
        let mixer = walk.mixer().unwrap();
        assert!((mixer.time() - 3.0 * DT).abs() < 1e-6);
        assert_eq!(mixer.action().time(), 0.0);
    }

    #[test]
    fn test_no_avatar_leaves_state_untouched() {
        let mut walk = animator();
        walk.set_skeleton(skeleton());
        walk.set_clip(clip());
        walk.update(Some(Vec3::new(1.0, 0.0, 0.0)));
        let before = walk.mixer().unwrap().time();

        assert_eq!(walk.update(None), PlaybackState::Playing);
        assert_eq!(walk.mixer().unwrap().time(), before);
    }

    #[test]
    fn test_late_assets_are_ignored_after_build() {
        let mut walk = animator();
        walk.set_skeleton(skeleton());
        walk.set_clip(clip());
        walk.set_skeleton(Skeleton::new(vec!["Other".into()]));
        assert_eq!(walk.mixer().map(|m| m.bound_tracks()), Some(1));
    }

    #[test]
    fn test_raised_threshold_stops_walk_next_update() {
        let mut walk = animator();
        walk.set_skeleton(skeleton());
        walk.set_clip(clip());
        let velocity = Some(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(walk.update(velocity), PlaybackState::Playing);

        walk.set_threshold(1.0);
        assert_eq!(walk.threshold(), 1.0);
        assert_eq!(walk.state(), PlaybackState::Playing);
        assert_eq!(walk.update(velocity), PlaybackState::Stopped);
    }
}
