//! # Hierarchy Builder
//!
//! Links loaded bones into a tree by walking node ancestry, locates the
//! root, and composes each bone's bind pose relative to its parent's
//! inverse bind transform. Skinning shaders accumulate transforms down the
//! tree at runtime, so the parent-relative form is computed once here
//! instead of per frame.

use std::collections::HashMap;

use log::warn;

use crate::importer::ImportError;
use crate::scene::{SkinDeformer, SourceScene};
use crate::skeleton::{BoneIndex, Skeleton};

/// Resolves parent/child links for the bones loaded from `skin`.
///
/// `base` is the skeleton index of the skin's first cluster. A bone whose
/// node-parent is not itself a bone (a scene root, an armature container)
/// stays unparented and becomes a root candidate.
pub(crate) fn link_parents(
    skeleton: &mut Skeleton,
    base: BoneIndex,
    skin: &SkinDeformer,
    scene: &SourceScene,
    bone_map: &HashMap<String, BoneIndex>,
) {
    for (offset, cluster) in skin.clusters.iter().enumerate() {
        let node = &scene.nodes[cluster.link_node];
        let Some(parent_node) = node.parent else {
            continue;
        };
        let parent_name = &scene.nodes[parent_node].name;
        if let Some(&parent) = bone_map.get(parent_name) {
            let bone = base + offset;
            skeleton[bone].parent = Some(parent);
            skeleton[parent].children.push(bone);
        }
    }
}

/// Converts bind poses from skeleton-global space into parent-relative
/// space, walking the tree from the root.
///
/// Each visited non-root bone's `init_mat` is multiplied by its parent's
/// `offset_mat` (inverse bind pose). Offset matrices are never touched, so
/// visiting order within the tree does not matter; an explicit stack is
/// used instead of recursion to stay safe on very deep skeletons. The root
/// keeps its global-space bind pose.
///
/// Bones not reachable from the root — extra unparented bones, or bones
/// below them — are left in global space and reported with a warning.
pub(crate) fn compose_relative(skeleton: &mut Skeleton) -> Result<(), ImportError> {
    if skeleton.is_empty() {
        return Ok(());
    }
    let root = skeleton.root().ok_or(ImportError::MissingRoot)?;

    let extra_roots: Vec<&str> = skeleton
        .iter()
        .enumerate()
        .filter(|&(index, bone)| index != root && bone.parent.is_none())
        .map(|(_, bone)| bone.name.as_str())
        .collect();
    if !extra_roots.is_empty() {
        warn!(
            "skeleton has extra unparented bones {:?}; only `{}` is composed as root",
            extra_roots, skeleton[root].name
        );
    }

    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        stack.extend(skeleton[index].children.iter().copied());
        if let Some(parent) = skeleton[index].parent {
            let parent_offset = skeleton[parent].offset_mat;
            skeleton[index].init_mat = skeleton[index].init_mat * parent_offset;
        }
    }
    Ok(())
}
