//! glTF parsing into [`Skeleton`]s and [`AnimationClip`]s.

use std::path::Path;

use folio_animation::{AnimationClip, Keyframes, Skeleton, Track, TrackProperty};
use glam::{Quat, Vec3};
use gltf::animation::Property;
use gltf::animation::util::ReadOutputs;
use tracing::{debug, warn};

use crate::error::AssetError;

fn import(path: &Path) -> Result<(gltf::Document, Vec<gltf::buffer::Data>), AssetError> {
    let (doc, buffers, _images) = gltf::import(path).map_err(|source| AssetError::Import {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((doc, buffers))
}

/// Joint names of the first skin in the model. Unnamed joints get `node<N>`.
pub fn load_skeleton(path: &Path) -> Result<Skeleton, AssetError> {
    let (doc, _buffers) = import(path)?;
    let skin = doc
        .skins()
        .next()
        .ok_or_else(|| AssetError::NoSkin(path.to_path_buf()))?;
    let joints: Vec<String> = skin
        .joints()
        .map(|node| match node.name() {
            Some(name) => name.to_string(),
            None => format!("node{}", node.index()),
        })
        .collect();
    debug!("Skeleton from {} has {} joints", path.display(), joints.len());
    Ok(Skeleton::new(joints))
}

/// The first animation in the file, with tracks named after their target nodes.
pub fn load_walk_clip(path: &Path) -> Result<AnimationClip, AssetError> {
    let (doc, buffers) = import(path)?;
    let animation = doc
        .animations()
        .next()
        .ok_or_else(|| AssetError::NoAnimation(path.to_path_buf()))?;

    let mut tracks = Vec::new();
    for channel in animation.channels() {
        let target = channel.target();
        let node = target.node();
        let name = node
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("node{}", node.index()));

        let reader = channel.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
        let Some(inputs) = reader.read_inputs() else {
            continue;
        };
        let times: Vec<f32> = inputs.collect();
        let Some(outputs) = reader.read_outputs() else {
            continue;
        };

        let (property, values) = match (target.property(), outputs) {
            (Property::Translation, ReadOutputs::Translations(it)) => {
                (TrackProperty::Translation, Keyframes::Vec3(it.map(Vec3::from).collect()))
            }
            (Property::Rotation, ReadOutputs::Rotations(it)) => (
                TrackProperty::Rotation,
                Keyframes::Quat(
                    it.into_f32()
                        .map(|v| Quat::from_xyzw(v[0], v[1], v[2], v[3]).normalize())
                        .collect(),
                ),
            ),
            (Property::Scale, ReadOutputs::Scales(it)) => {
                (TrackProperty::Scale, Keyframes::Vec3(it.map(Vec3::from).collect()))
            }
            // Morph target weights have no bone to drive.
            _ => continue,
        };

        if values.len() != times.len() {
            // Cubic-spline samplers store tangents alongside each key.
            warn!("Skipping {name}: {} keys but {} values", times.len(), values.len());
            continue;
        }

        tracks.push(Track {
            name,
            property,
            times,
            values,
        });
    }

    if tracks.is_empty() {
        return Err(AssetError::NoAnimation(path.to_path_buf()));
    }

    let clip_name = animation.name().unwrap_or("walk");
    let clip = AnimationClip::new(clip_name, tracks);
    debug!(
        "Clip '{}' from {}: {} tracks, {:.2}s",
        clip.name,
        path.display(),
        clip.tracks.len(),
        clip.duration
    );
    Ok(clip)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::{Path, PathBuf};

    /// Two-joint skinned rig with Mixamo-style names.
    pub const RIG: &str = r#"{
        "asset": { "version": "2.0" },
        "nodes": [
            { "name": "mixamorigHips", "children": [1] },
            { "name": "mixamorigSpine" },
            { "name": "Body" }
        ],
        "skins": [ { "joints": [0, 1] } ]
    }"#;

    /// One translation channel on the hips, two keys over one second.
    pub const WALK: &str = r#"{
        "asset": { "version": "2.0" },
        "nodes": [ { "name": "mixamorigHips" } ],
        "buffers": [ {
            "byteLength": 32,
            "uri": "data:application/octet-stream;base64,AAAAAAAAgD8AAAAAAAAAAAAAAAAAAAAAAAAAQAAAAAA="
        } ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 8 },
            { "buffer": 0, "byteOffset": 8, "byteLength": 24 }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5126, "count": 2, "type": "SCALAR", "min": [0.0], "max": [1.0] },
            { "bufferView": 1, "componentType": 5126, "count": 2, "type": "VEC3" }
        ],
        "animations": [ {
            "name": "Walk",
            "samplers": [ { "input": 0, "output": 1 } ],
            "channels": [ { "sampler": 0, "target": { "node": 0, "path": "translation" } } ]
        } ]
    }"#;

    pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{RIG, WALK, write};
    use super::*;
    use folio_animation::TrackValue;

    #[test]
    fn test_skeleton_joint_names() {
        let dir = tempfile::tempdir().unwrap();
        let skeleton = load_skeleton(&write(dir.path(), "avatar.gltf", RIG)).unwrap();
        assert_eq!(skeleton.joints, vec!["mixamorigHips", "mixamorigSpine"]);
    }

    #[test]
    fn test_model_without_skin() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "walk.gltf", WALK);
        assert!(matches!(load_skeleton(&path), Err(AssetError::NoSkin(_))));
    }

    #[test]
    fn test_walk_clip_tracks() {
        let dir = tempfile::tempdir().unwrap();
        let clip = load_walk_clip(&write(dir.path(), "walk.gltf", WALK)).unwrap();
        assert_eq!(clip.name, "Walk");
        assert_eq!(clip.duration, 1.0);
        assert_eq!(clip.track_names(), vec!["mixamorigHips"]);
        assert_eq!(clip.tracks[0].property, TrackProperty::Translation);
        match clip.tracks[0].sample(0.5) {
            Some(TrackValue::Vec3(v)) => assert!((v - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-5),
            other => panic!("unexpected sample {other:?}"),
        }
    }

    #[test]
    fn test_file_without_animation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "avatar.gltf", RIG);
        assert!(matches!(load_walk_clip(&path), Err(AssetError::NoAnimation(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_skeleton(&dir.path().join("nope.glb"));
        assert!(matches!(result, Err(AssetError::Import { .. })));
    }
}
