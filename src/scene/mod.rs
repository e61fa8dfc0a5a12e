//! # Source Scene Document
//!
//! The importer's read-only view of an externally parsed FBX file. An
//! upstream reader walks the FBX object graph and fills these structures;
//! the import pipeline in [`crate::importer`] only ever reads them.
//!
//! The document keeps the source's conventions: transforms are stored in
//! double precision, vertices are addressed through control points, and
//! animation is expressed as an absolute frame span taken from the scene's
//! global time settings.

use std::collections::BTreeMap;

use cgmath::{Matrix4, SquareMatrix};

/// Index of a node in [`SourceScene::nodes`].
pub type NodeId = usize;

/// An absolute frame number in the source scene's time domain.
pub type FrameTime = i64;

/// A node in the source scene graph.
///
/// Only the pieces the skeletal importer needs are kept: the name (bone
/// identity), the parent link (bone ancestry), and the node's global
/// transform over time.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Node name; bone names are taken verbatim from here.
    pub name: String,
    /// Parent node, `None` for scene roots.
    pub parent: Option<NodeId>,
    /// Global transform of the node when no animation key applies.
    pub bind_transform: Matrix4<f64>,
    /// Global transform per animation frame, keyed by absolute frame time.
    pub global_curve: BTreeMap<FrameTime, Matrix4<f64>>,
}

impl SceneNode {
    /// Creates an unanimated node at the identity transform.
    pub fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            bind_transform: Matrix4::identity(),
            global_curve: BTreeMap::new(),
        }
    }

    /// Global transform of this node evaluated at `time`.
    ///
    /// A node without a key at `time` holds its bind transform, matching how
    /// an unanimated FBX node evaluates to its resting pose.
    pub fn global_transform_at(&self, time: FrameTime) -> Matrix4<f64> {
        self.global_curve
            .get(&time)
            .copied()
            .unwrap_or(self.bind_transform)
    }
}

/// One bone's influence record on a mesh: the linked node, its bind-pose
/// transform, and the control points it moves.
///
/// `control_point_indices` and `control_point_weights` are parallel arrays
/// of equal length, exactly as the source stores them.
#[derive(Debug, Clone)]
pub struct SkinCluster {
    /// The scene node this cluster is bound to.
    pub link_node: NodeId,
    /// Bind pose of the linked node in the skeleton's reference frame
    /// (the cluster's transform-link matrix).
    pub transform_link: Matrix4<f64>,
    /// Control points influenced by this bone.
    pub control_point_indices: Vec<i32>,
    /// Weight for each entry of `control_point_indices`.
    pub control_point_weights: Vec<f64>,
}

/// A skin deformer: the flat list of clusters attached to a mesh.
#[derive(Debug, Clone, Default)]
pub struct SkinDeformer {
    pub clusters: Vec<SkinCluster>,
}

/// A mesh as seen by the skeletal importer.
#[derive(Debug, Clone, Default)]
pub struct SourceMesh {
    /// Control-point index of every output vertex, in polygon-vertex order.
    ///
    /// A control point shared by several polygons (UV seams, hard edges)
    /// appears here once per duplicated output vertex.
    pub polygon_vertices: Vec<i32>,
    /// Skin deformers attached to the mesh; empty for rigid meshes.
    pub skins: Vec<SkinDeformer>,
}

/// The active animation take's frame bounds, from the scene's global time
/// settings.
#[derive(Debug, Clone, Copy)]
pub struct AnimationSpan {
    pub start_frame: FrameTime,
    pub stop_frame: FrameTime,
}

/// The parsed source scene handed to [`crate::importer::BoneParser`].
#[derive(Debug, Clone, Default)]
pub struct SourceScene {
    pub nodes: Vec<SceneNode>,
    pub meshes: Vec<SourceMesh>,
    /// `None` when the file carries no animation stack.
    pub animation: Option<AnimationSpan>,
}
