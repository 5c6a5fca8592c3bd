//! Window-less driver: ticks a fixed number of frames back to back.

use tracing::{debug, info};

use crate::scheduler::{FrameReport, FrameTick};

pub struct HeadlessDriver {
    ticks: u64,
}

impl HeadlessDriver {
    pub fn new(ticks: u64) -> Self {
        Self { ticks }
    }

    /// Runs every tick and returns the last report, if any ran.
    pub fn run<F: FrameTick>(&self, frame: &mut F) -> Option<FrameReport> {
        self.run_with(frame, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_frame` after each tick.
    pub fn run_with<F: FrameTick>(
        &self,
        frame: &mut F,
        mut on_frame: impl FnMut(&FrameReport),
    ) -> Option<FrameReport> {
        let mut last = None;
        for _ in 0..self.ticks {
            let report = frame.tick();
            debug!(tick = report.tick, playback = ?report.playback, "headless frame");
            on_frame(&report);
            last = Some(report);
        }
        if let Some(report) = &last {
            info!(
                "Headless run finished after {} ticks, avatar at {:?}",
                report.tick, report.avatar_position
            );
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::PlaybackState;
    use glam::Vec3;

    struct Counter(u64);

    impl FrameTick for Counter {
        fn tick(&mut self) -> FrameReport {
            self.0 += 1;
            FrameReport {
                tick: self.0,
                ran: true,
                velocity: None,
                playback: PlaybackState::Stopped,
                avatar_position: None,
                camera_eye: Vec3::ZERO,
                camera_target: Vec3::ZERO,
                navigation: None,
                redraw_requested: true,
            }
        }
    }

    #[test]
    fn test_runs_requested_ticks() {
        let mut counter = Counter(0);
        let last = HeadlessDriver::new(5).run(&mut counter);
        assert_eq!(counter.0, 5);
        assert_eq!(last.map(|r| r.tick), Some(5));
    }

    #[test]
    fn test_zero_ticks_returns_none() {
        let mut counter = Counter(0);
        assert!(HeadlessDriver::new(0).run(&mut counter).is_none());
        assert_eq!(counter.0, 0);
    }

    #[test]
    fn test_callback_sees_every_frame() {
        let mut counter = Counter(0);
        let mut seen = Vec::new();
        HeadlessDriver::new(3).run_with(&mut counter, |r| seen.push(r.tick));
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
