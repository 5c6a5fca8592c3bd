//! Skeletal walk-cycle playback.
//!
//! A clip is a set of keyframed tracks addressed by bone name. Clips authored
//! for a different rig carry a naming prefix on every bone; [`retarget_clip`]
//! strips it once before the clip is bound to the avatar's [`Skeleton`].
//! [`WalkAnimator`] waits for both halves to arrive, builds the
//! [`AnimationMixer`], and then starts or stops the walk from the avatar's
//! speed every frame.

pub mod clip;
pub mod mixer;
pub mod playback;
pub mod retarget;
pub mod walk;

pub use clip::{AnimationClip, Keyframes, Skeleton, Track, TrackProperty, TrackValue};
pub use mixer::{AnimationMixer, BonePose, ClipAction};
pub use playback::{PlaybackState, update_playback};
pub use retarget::{DEFAULT_RETARGET_PREFIX, retarget_clip};
pub use walk::WalkAnimator;
