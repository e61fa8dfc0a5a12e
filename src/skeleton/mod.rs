//! # Skeleton Representation
//!
//! The engine-side output of the import pipeline: a flat arena of bones
//! linked into a tree by integer indices, plus the per-vertex skinning
//! record in [`vertex`].
//!
//! Bones are stored in cluster order in a single `Vec`; `parent` and
//! `children` hold indices into that `Vec` rather than references, so the
//! skeleton stays valid no matter how it is moved or cloned after import.

pub mod vertex;

use std::ops::{Index, IndexMut};

use cgmath::{Matrix4, SquareMatrix};

/// Index of a bone in [`Skeleton::bones`].
pub type BoneIndex = usize;

/// A single bone of an imported skeleton.
#[derive(Debug, Clone)]
pub struct Bone {
    /// Bone name, taken from the linked scene node. Unique per skeleton
    /// in well-formed files.
    pub name: String,
    /// Parent bone, `None` for the root.
    pub parent: Option<BoneIndex>,
    /// Child bones, in discovery order.
    pub children: Vec<BoneIndex>,
    /// Bind pose. Skeleton-global when loaded; parent-relative after
    /// hierarchy composition (the root stays global).
    pub init_mat: Matrix4<f32>,
    /// Inverse bind pose, used to move vertices back into bone-local space
    /// for skinning. Computed once at load time and never modified.
    pub offset_mat: Matrix4<f32>,
    /// Global transform per animation frame; empty when the scene has no
    /// animation stack.
    pub frame_mats: Vec<Matrix4<f32>>,
}

impl Bone {
    /// Creates an unlinked bone at the identity bind pose.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            init_mat: Matrix4::identity(),
            offset_mat: Matrix4::identity(),
            frame_mats: Vec::new(),
        }
    }

    /// Number of animation frames sampled for this bone.
    pub fn frame_count(&self) -> usize {
        self.frame_mats.len()
    }
}

/// An imported skeleton: the bone arena plus tree structure.
///
/// An empty skeleton is the normal result for rigid (unskinned) meshes.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    pub bones: Vec<Bone>,
}

impl Skeleton {
    /// Number of bones.
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// `true` when the mesh carried no skin data.
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// The first bone without a parent, in bone order.
    ///
    /// This is the bone the hierarchy builder composes as the tree root.
    pub fn root(&self) -> Option<BoneIndex> {
        self.bones.iter().position(|bone| bone.parent.is_none())
    }

    /// Looks a bone up by name. Linear scan; skeletons are small.
    pub fn bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|bone| bone.name == name)
    }

    /// Iterates over the bones in cluster order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bone> {
        self.bones.iter()
    }
}

impl Index<BoneIndex> for Skeleton {
    type Output = Bone;

    fn index(&self, index: BoneIndex) -> &Bone {
        &self.bones[index]
    }
}

impl IndexMut<BoneIndex> for Skeleton {
    fn index_mut(&mut self, index: BoneIndex) -> &mut Bone {
        &mut self.bones[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_skeleton_has_no_root() {
        let skeleton = Skeleton::default();
        assert!(skeleton.is_empty());
        assert_eq!(skeleton.root(), None);
    }

    #[test]
    fn test_root_is_first_unparented_bone() {
        let mut skeleton = Skeleton::default();
        let mut child = Bone::new("hand");
        child.parent = Some(1);
        skeleton.bones.push(child);
        skeleton.bones.push(Bone::new("arm"));
        skeleton.bones.push(Bone::new("loose"));

        assert_eq!(skeleton.root(), Some(1));
    }

    #[test]
    fn test_bone_lookup_by_name() {
        let mut skeleton = Skeleton::default();
        skeleton.bones.push(Bone::new("hips"));
        skeleton.bones.push(Bone::new("spine"));

        assert_eq!(skeleton.bone_by_name("spine").map(|b| &*b.name), Some("spine"));
        assert!(skeleton.bone_by_name("tail").is_none());
    }
}
