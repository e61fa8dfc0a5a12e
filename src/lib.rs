// src/lib.rs
//! fbx-skin
//!
//! An FBX skeletal importer: converts an externally-parsed FBX scene graph
//! into an engine-ready skinned mesh. The output is a bone tree with
//! per-frame animation matrices plus per-vertex bone weights normalized
//! for GPU skinning.
//!
//! The crate does not read `.fbx` files itself; an upstream reader fills
//! the [`scene::SourceScene`] document, and [`importer::BoneParser`] does
//! the rest:
//!
//! ```
//! use fbx_skin::{BoneParser, SkinnedVertex};
//! use fbx_skin::scene::SourceScene;
//!
//! fn import(scene: &SourceScene) -> Result<(), fbx_skin::ImportError> {
//!     let mut vertex_buffers: Vec<Vec<SkinnedVertex>> = scene
//!         .meshes
//!         .iter()
//!         .map(|mesh| vec![SkinnedVertex::default(); mesh.polygon_vertices.len()])
//!         .collect();
//!     let skeleton = BoneParser::parse(scene, &mut vertex_buffers)?;
//!     // hand skeleton + vertex_buffers to the renderer
//!     # let _ = skeleton;
//!     Ok(())
//! }
//! ```

pub mod importer;
pub mod math;
pub mod prelude;
pub mod scene;
pub mod skeleton;

// Re-export main types for convenience
pub use importer::{BoneParser, ImportError};
pub use skeleton::vertex::{SkinnedVertex, MAX_INFLUENCES};
pub use skeleton::{Bone, BoneIndex, Skeleton};
