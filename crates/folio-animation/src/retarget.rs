//! Bone-name remapping for clips authored against a prefixed rig.

use tracing::debug;

use crate::clip::AnimationClip;

/// Prefix carried by bone names in clips exported from the Mixamo rig.
pub const DEFAULT_RETARGET_PREFIX: &str = "mixamorig";

/// Returns a copy of `clip` with `prefix` stripped from every track name that
/// starts with it, plus the number of renamed tracks.
///
/// The prefix is removed once; a name like `"mixamorigmixamorigHips"` becomes
/// `"mixamorigHips"`. An empty prefix renames nothing.
pub fn retarget_clip(clip: &AnimationClip, prefix: &str) -> (AnimationClip, usize) {
    let mut out = clip.clone();
    if prefix.is_empty() {
        return (out, 0);
    }
    let mut renamed = 0;
    for track in &mut out.tracks {
        if let Some(stripped) = track.name.strip_prefix(prefix) {
            debug!("Retargeted bone {} -> {}", track.name, stripped);
            track.name = stripped.to_string();
            renamed += 1;
        }
    }
    (out, renamed)
}
