//! # FBX Bone Import Pipeline
//!
//! This module converts a parsed FBX scene into an engine-ready skinned
//! mesh: a bone tree with per-frame animation matrices, and per-vertex
//! bone weights normalized for GPU skinning.
//!
//! ## Pipeline
//!
//! Data flows strictly forward through five stages, run once per imported
//! asset:
//!
//! 1. **Animation time** ([`animation_time`]) - frame count and per-frame
//!    sample times from the scene's animation span
//! 2. **Bone loading** - one bone per skin cluster, with bind pose, offset
//!    matrix, and sampled per-frame transforms
//! 3. **Hierarchy** ([`hierarchy`]) - parent/child links from node
//!    ancestry, then bind poses composed relative to each parent
//! 4. **Weight assignment** ([`weights`]) - up to four (joint, weight)
//!    pairs per output vertex
//! 5. **Weight normalization** ([`weights`]) - per-vertex rescale to a
//!    unit weight sum
//!
//! ## Usage
//!
//! ```
//! use fbx_skin::{BoneParser, SkinnedVertex};
//! use fbx_skin::scene::SourceScene;
//!
//! let scene = SourceScene::default();
//! let mut vertex_buffers: Vec<Vec<SkinnedVertex>> = Vec::new();
//! let skeleton = BoneParser::parse(&scene, &mut vertex_buffers)?;
//! assert!(skeleton.is_empty()); // no meshes, rigid result
//! # Ok::<(), fbx_skin::ImportError>(())
//! ```

pub mod animation_time;
mod hierarchy;
mod weights;

use std::collections::HashMap;

use cgmath::SquareMatrix;
use log::{debug, warn};
use thiserror::Error;

use crate::math::matrix_to_f32;
use crate::scene::{NodeId, SkinDeformer, SourceScene};
use crate::skeleton::vertex::SkinnedVertex;
use crate::skeleton::{Bone, BoneIndex, Skeleton};

use animation_time::AnimationTime;

/// Failures that abort an import.
///
/// Everything else the source format can throw at the pipeline (missing
/// skins, duplicate names, over-subscribed vertices, unweighted vertices)
/// is absorbed locally and at most logged.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A cluster's bind-pose matrix could not be inverted; without the
    /// offset matrix the bone cannot skin anything.
    #[error("bind pose of bone `{0}` is not invertible")]
    SingularBindPose(String),
    /// A cluster links to a node the scene does not contain.
    #[error("skin cluster {cluster} links to missing node {node}")]
    MissingLinkNode { cluster: usize, node: NodeId },
    /// Every bone has a parent, so bone parenting forms a cycle.
    #[error("skeleton has no root bone")]
    MissingRoot,
}

/// Converts skin clusters into a [`Skeleton`] and fills per-vertex weights.
///
/// The name-to-bone lookup table is built once during bone loading and
/// only read afterwards.
pub struct BoneParser {
    animation_time: AnimationTime,
    bone_map: HashMap<String, BoneIndex>,
}

impl BoneParser {
    /// Runs the full import pipeline over `scene`.
    ///
    /// `vertex_buffers` is parallel to `scene.meshes`, one record per
    /// polygon vertex, zero-initialized by the caller; weight and joint
    /// slots are filled and normalized in place. The skeleton is driven by
    /// the skin deformers of the scene's first mesh.
    ///
    /// A scene with no meshes or no skin deformers yields an empty
    /// skeleton and untouched vertex buffers: the mesh is rigid, which is
    /// not an error.
    pub fn parse(
        scene: &SourceScene,
        vertex_buffers: &mut [Vec<SkinnedVertex>],
    ) -> Result<Skeleton, ImportError> {
        let mut parser = Self {
            animation_time: AnimationTime::parse(scene),
            bone_map: HashMap::new(),
        };
        parser.run(scene, vertex_buffers)
    }

    fn run(
        &mut self,
        scene: &SourceScene,
        vertex_buffers: &mut [Vec<SkinnedVertex>],
    ) -> Result<Skeleton, ImportError> {
        let Some(first_mesh) = scene.meshes.first() else {
            return Ok(Skeleton::default());
        };

        let mut skeleton = Skeleton::default();
        let mut base = 0;
        for skin in &first_mesh.skins {
            self.load_bones(&mut skeleton, skin, scene)?;
            hierarchy::link_parents(&mut skeleton, base, skin, scene, &self.bone_map);
            base += skin.clusters.len();
        }
        hierarchy::compose_relative(&mut skeleton)?;

        if skeleton.is_empty() {
            debug!("mesh carries no skin clusters, importing as rigid");
            return Ok(skeleton);
        }

        let mut base = 0;
        for skin in &first_mesh.skins {
            for (offset, cluster) in skin.clusters.iter().enumerate() {
                let joint = (base + offset) as u32;
                for (mesh, vertices) in scene.meshes.iter().zip(vertex_buffers.iter_mut()) {
                    weights::assign_cluster_weights(
                        vertices,
                        &mesh.polygon_vertices,
                        cluster,
                        joint,
                    );
                }
            }
            base += skin.clusters.len();
        }

        for vertices in vertex_buffers.iter_mut() {
            weights::normalize_weights(vertices);
        }

        debug!(
            "imported skeleton: {} bones, {} frames",
            skeleton.len(),
            self.animation_time.frame_count()
        );
        Ok(skeleton)
    }

    /// Appends one bone per cluster of `skin` to the skeleton.
    ///
    /// For each cluster this reads the linked node's name, converts the
    /// bind-pose transform-link matrix to single precision, inverts it into
    /// the offset matrix, and samples the node's global transform at every
    /// animation frame. Each bone is registered in the name lookup table;
    /// on duplicate names the later cluster wins, with a warning.
    fn load_bones(
        &mut self,
        skeleton: &mut Skeleton,
        skin: &SkinDeformer,
        scene: &SourceScene,
    ) -> Result<(), ImportError> {
        if skin.clusters.is_empty() {
            return Ok(());
        }
        skeleton.bones.reserve(skin.clusters.len());

        for (cluster_index, cluster) in skin.clusters.iter().enumerate() {
            let node = scene
                .nodes
                .get(cluster.link_node)
                .ok_or(ImportError::MissingLinkNode {
                    cluster: cluster_index,
                    node: cluster.link_node,
                })?;

            let mut bone = Bone::new(&node.name);
            bone.init_mat = matrix_to_f32(&cluster.transform_link);
            bone.offset_mat = bone
                .init_mat
                .invert()
                .ok_or_else(|| ImportError::SingularBindPose(node.name.clone()))?;
            bone.frame_mats = (0..self.animation_time.frame_count())
                .map(|frame| {
                    let time = self.animation_time.time_at(frame);
                    matrix_to_f32(&node.global_transform_at(time))
                })
                .collect();

            let index = skeleton.len();
            if let Some(previous) = self.bone_map.insert(node.name.clone(), index) {
                warn!(
                    "duplicate bone name `{}`: bone {index} replaces bone {previous} \
                     in the lookup table",
                    node.name
                );
            }
            skeleton.bones.push(bone);
        }
        Ok(())
    }
}
