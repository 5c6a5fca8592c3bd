//! One-shot background loads reported through a channel.

use std::path::PathBuf;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use folio_animation::{AnimationClip, Skeleton};
use tracing::{error, info, warn};

use crate::error::AssetError;
use crate::gltf_import::{load_skeleton, load_walk_clip};

/// Something to load.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetRequest {
    /// Skinned avatar model; delivers its skeleton.
    Avatar(PathBuf),
    /// Walk-cycle animation; delivers its first clip.
    WalkClip(PathBuf),
}

/// The single completion report of an [`AssetRequest`].
#[derive(Debug, Clone)]
pub enum AssetEvent {
    AvatarReady(Skeleton),
    AvatarFailed(String),
    ClipReady(AnimationClip),
    ClipFailed(String),
}

/// Runs each request on its own named thread.
///
/// There are no retries, cancellation or timeouts: a load that hangs simply
/// never reports.
pub struct AssetLoader {
    receiver: Receiver<AssetEvent>,
    handles: Vec<JoinHandle<()>>,
    pending: usize,
}

impl AssetLoader {
    /// Starts loading every request immediately.
    pub fn spawn(requests: Vec<AssetRequest>) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let mut handles = Vec::with_capacity(requests.len());
        let pending = requests.len();

        for (i, request) in requests.into_iter().enumerate() {
            let tx = sender.clone();
            let fallback = tx.clone();
            let failed_request = request.clone();
            let spawned = std::thread::Builder::new()
                .name(format!("asset-loader-{i}"))
                .spawn(move || run_request(request, &tx));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    let _ = fallback.send(failure_event(&failed_request, &AssetError::Spawn(e)));
                }
            }
        }

        Self {
            receiver,
            handles,
            pending,
        }
    }

    /// A loader with nothing in flight.
    pub fn idle() -> Self {
        Self::spawn(Vec::new())
    }

    /// A loader whose events are already queued, as if every load had finished.
    pub fn preloaded(events: Vec<AssetEvent>) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let pending = events.len();
        for event in events {
            let _ = sender.send(event);
        }
        Self {
            receiver,
            handles: Vec::new(),
            pending,
        }
    }

    /// Every event that has arrived since the last call. Never blocks.
    pub fn drain(&mut self) -> Vec<AssetEvent> {
        let events: Vec<AssetEvent> = self.receiver.try_iter().collect();
        self.pending = self.pending.saturating_sub(events.len());
        events
    }

    /// Requests that have not reported yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Joins loader threads that have already finished.
    pub fn reap_finished(&mut self) {
        let (finished, running): (Vec<_>, Vec<_>) =
            self.handles.drain(..).partition(|h| h.is_finished());
        for handle in finished {
            if handle.join().is_err() {
                error!("Asset loader thread panicked");
            }
        }
        self.handles = running;
    }
}

fn run_request(request: AssetRequest, tx: &Sender<AssetEvent>) {
    let event = match &request {
        AssetRequest::Avatar(path) => match load_skeleton(path) {
            Ok(skeleton) => {
                info!("Avatar loaded from {} ({} bones)", path.display(), skeleton.len());
                AssetEvent::AvatarReady(skeleton)
            }
            Err(e) => failure_event(&request, &e),
        },
        AssetRequest::WalkClip(path) => match load_walk_clip(path) {
            Ok(clip) => {
                info!("Walk clip loaded from {} ({:.2}s)", path.display(), clip.duration);
                AssetEvent::ClipReady(clip)
            }
            Err(e) => failure_event(&request, &e),
        },
    };
    // The receiver is gone once the app shuts down; nothing left to tell.
    let _ = tx.send(event);
}

fn failure_event(request: &AssetRequest, err: &AssetError) -> AssetEvent {
    match request {
        AssetRequest::Avatar(_) => {
            warn!("Avatar failed to load: {err}");
            AssetEvent::AvatarFailed(err.to_string())
        }
        AssetRequest::WalkClip(_) => {
            warn!("Walk clip failed to load: {err}");
            AssetEvent::ClipFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gltf_import::fixtures::{RIG, WALK, write};
    use std::time::{Duration, Instant};

    const WAIT: Duration = Duration::from_secs(10);

    /// Polls `drain` the way the frame loop does until every request reported.
    fn collect(loader: &mut AssetLoader) -> Vec<AssetEvent> {
        let deadline = Instant::now() + WAIT;
        let mut events = Vec::new();
        while loader.pending() > 0 {
            assert!(Instant::now() < deadline, "loader timed out");
            events.extend(loader.drain());
            std::thread::sleep(Duration::from_millis(5));
        }
        events
    }

    #[test]
    fn test_each_request_reports_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = AssetLoader::spawn(vec![
            AssetRequest::Avatar(write(dir.path(), "avatar.gltf", RIG)),
            AssetRequest::WalkClip(write(dir.path(), "walk.gltf", WALK)),
        ]);
        assert_eq!(loader.pending(), 2);

        let events = collect(&mut loader);
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| matches!(e, AssetEvent::AvatarReady(s) if s.len() == 2)));
        assert!(events.iter().any(|e| matches!(e, AssetEvent::ClipReady(c) if c.tracks.len() == 1)));
        assert!(loader.drain().is_empty());
    }

    #[test]
    fn test_failures_are_events() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = AssetLoader::spawn(vec![
            AssetRequest::Avatar(dir.path().join("missing.glb")),
            AssetRequest::WalkClip(dir.path().join("missing-walk.glb")),
        ]);
        let events = collect(&mut loader);
        assert!(events.iter().any(|e| matches!(e, AssetEvent::AvatarFailed(_))));
        assert!(events.iter().any(|e| matches!(e, AssetEvent::ClipFailed(_))));
    }

    #[test]
    fn test_idle_loader_drains_nothing() {
        let mut loader = AssetLoader::idle();
        assert_eq!(loader.pending(), 0);
        assert!(loader.drain().is_empty());
        loader.reap_finished();
    }

    #[test]
    fn test_preloaded_events_drain_in_order() {
        let mut loader = AssetLoader::preloaded(vec![
            AssetEvent::AvatarFailed("missing".to_string()),
            AssetEvent::ClipFailed("missing".to_string()),
        ]);
        assert_eq!(loader.pending(), 2);
        let events = loader.drain();
        assert!(matches!(events[0], AssetEvent::AvatarFailed(_)));
        assert!(matches!(events[1], AssetEvent::ClipFailed(_)));
        assert_eq!(loader.pending(), 0);
    }
}
