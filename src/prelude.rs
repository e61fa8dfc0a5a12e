//! # fbx-skin Prelude
//!
//! Imports the types a typical import integration touches.
//!
//! ## Usage
//!
//! ```rust
//! use fbx_skin::prelude::*;
//! ```

// Re-export the pipeline entry point
pub use crate::importer::{BoneParser, ImportError};
pub use crate::importer::animation_time::AnimationTime;

// Re-export skeleton and vertex types
pub use crate::skeleton::{Bone, BoneIndex, Skeleton};
pub use crate::skeleton::vertex::{SkinnedVertex, MAX_INFLUENCES};

// Re-export the source-scene document
pub use crate::scene::{
    AnimationSpan, FrameTime, NodeId, SceneNode, SkinCluster, SkinDeformer, SourceMesh,
    SourceScene,
};

// Re-export common external dependencies
pub use cgmath::{Matrix4, SquareMatrix};
