//! Walk playback state transitions.

/// Whether the walk cycle is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    Playing,
    #[default]
    Stopped,
}

/// Next playback state for the avatar's current speed.
///
/// Starts when `magnitude` rises above `threshold` and stops once it is at or
/// below it. Any other combination keeps `state`.
pub fn update_playback(magnitude: f32, threshold: f32, state: PlaybackState) -> PlaybackState {
    match state {
        PlaybackState::Stopped if magnitude > threshold => PlaybackState::Playing,
        PlaybackState::Playing if magnitude <= threshold => PlaybackState::Stopped,
        unchanged => unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PlaybackState::{Playing, Stopped};

    #[test]
    fn test_transitions_at_threshold() {
        for threshold in [0.1_f32, 1.0] {
            assert_eq!(update_playback(0.0, threshold, Stopped), Stopped);
            assert_eq!(update_playback(threshold, threshold, Stopped), Stopped);
            assert_eq!(update_playback(threshold + 0.01, threshold, Stopped), Playing);
            assert_eq!(update_playback(50.0, threshold, Stopped), Playing);

            assert_eq!(update_playback(50.0, threshold, Playing), Playing);
            assert_eq!(update_playback(threshold + 0.01, threshold, Playing), Playing);
            assert_eq!(update_playback(threshold, threshold, Playing), Stopped);
            assert_eq!(update_playback(0.0, threshold, Playing), Stopped);
        }
    }

    #[test]
    fn test_default_is_stopped() {
        assert_eq!(PlaybackState::default(), Stopped);
    }
}
