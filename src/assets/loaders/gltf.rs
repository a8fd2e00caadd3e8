//! Minimal glTF import for skeletons and clip metadata.
//!
//! Pulls exactly two things out of a glTF file: the first skin's bone
//! table (joint order, names, inverse bind matrices) and, for animation
//! files, the first animation's duration plus the set of animated node
//! names. Vertex data, materials, and textures are skipped entirely.

use std::fs;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use glam::Mat4;

use crate::animation::AnimationClip;
use crate::errors::{HolsterError, Result};
use crate::skeleton::{BoneInfo, BoneTable, Skeleton};

/// Loads the skeleton from the first skin in a glTF model file.
///
/// Bone ids follow the skin's joint order, which is the index space the
/// skinning system writes pose matrices in. A model without a skin is an
/// error: the base model is required for the rig to exist at all.
pub fn load_skeleton(path: &Path) -> Result<Skeleton> {
    let (gltf, buffers) = open(path)?;

    let Some(skin) = gltf.skins().next() else {
        return Err(HolsterError::MissingSkin(path.display().to_string()));
    };

    let reader = skin.reader(|buffer| Some(&buffers[buffer.index()]));
    let offsets: Vec<Mat4> = match reader.read_inverse_bind_matrices() {
        Some(iter) => iter.map(|m| Mat4::from_cols_array_2d(&m)).collect(),
        None => vec![Mat4::IDENTITY; skin.joints().count()],
    };

    let mut bones = BoneTable::new();
    for (id, joint) in skin.joints().enumerate() {
        let name = joint
            .name()
            .map_or_else(|| format!("joint_{id}"), str::to_string);
        let offset = offsets.get(id).copied().unwrap_or(Mat4::IDENTITY);
        bones.insert(BoneInfo { name, id, offset });
    }

    Ok(Skeleton::new(skin.name().unwrap_or("skeleton"), bones))
}

/// Loads the first animation in a glTF file as a clip.
///
/// Returns `None` when the file is absent or unparsable: a missing clip
/// only disables the state-machine transitions that need it, so this is
/// a warning, never an error.
#[must_use]
pub fn load_clip(path: &Path, skeleton: &Skeleton) -> Option<Arc<AnimationClip>> {
    match try_load_clip(path, skeleton) {
        Ok(clip) => Some(Arc::new(clip)),
        Err(err) => {
            log::warn!("skipping animation clip {}: {err}", path.display());
            None
        }
    }
}

fn try_load_clip(path: &Path, skeleton: &Skeleton) -> Result<AnimationClip> {
    let (gltf, buffers) = open(path)?;

    let Some(animation) = gltf.animations().next() else {
        return Err(HolsterError::MissingAnimation(path.display().to_string()));
    };

    let mut duration = 0.0_f32;
    let mut bones = BoneTable::new();
    // Animated nodes the skeleton has never seen get clip-local ids past
    // its range, with identity offsets; the skeleton table stays as
    // loaded.
    let mut next_id = skeleton.bone_count();

    for channel in animation.channels() {
        let reader = channel.reader(|buffer| Some(&buffers[buffer.index()]));
        if let Some(inputs) = reader.read_inputs() {
            duration = inputs.fold(duration, f32::max);
        }

        let node = channel.target().node();
        let name = node
            .name()
            .map_or_else(|| format!("node_{}", node.index()), str::to_string);
        if bones.get(&name).is_some() {
            continue;
        }

        let (id, offset) = match skeleton.bone_table().get(&name) {
            Some(bone) => (bone.id, bone.offset),
            None => {
                let id = next_id;
                next_id += 1;
                (id, Mat4::IDENTITY)
            }
        };
        bones.insert(BoneInfo { name, id, offset });
    }

    let name = animation
        .name()
        .map_or_else(|| file_stem(path), str::to_string);
    Ok(AnimationClip::new(&name, duration, bones))
}

fn open(path: &Path) -> Result<(gltf::Gltf, Vec<Vec<u8>>)> {
    let file = fs::File::open(path)?;
    let gltf = gltf::Gltf::from_reader_without_validation(BufReader::new(file))?;
    let base_path = path.parent().unwrap_or(Path::new("."));
    let buffers = load_buffers(&gltf, base_path)?;
    Ok((gltf, buffers))
}

fn load_buffers(gltf: &gltf::Gltf, base_path: &Path) -> Result<Vec<Vec<u8>>> {
    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf
                    .blob
                    .as_deref()
                    .ok_or_else(|| HolsterError::Gltf("missing GLB binary chunk".to_string()))?;
                buffer_data.push(blob.to_vec());
            }
            gltf::buffer::Source::Uri(uri) => {
                buffer_data.push(fs::read(base_path.join(uri))?);
            }
        }
    }
    Ok(buffer_data)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("clip")
        .to_string()
}
