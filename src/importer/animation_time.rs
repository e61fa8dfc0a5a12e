//! # Animation Time Resolver
//!
//! Resolves the active take's frame bounds from the scene's global time
//! settings, before any bone is loaded. The bone loader asks it for the
//! frame count and the absolute sample time of each frame.

use crate::scene::{FrameTime, SourceScene};

/// Frame bounds of the active animation take.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationTime {
    start_frame: FrameTime,
    frame_count: usize,
}

impl AnimationTime {
    /// Reads the take bounds from the scene.
    ///
    /// A scene without an animation stack resolves to zero frames; the
    /// pipeline then skips per-frame sampling and bones keep only their
    /// bind pose.
    pub fn parse(scene: &SourceScene) -> Self {
        match scene.animation {
            Some(span) => Self {
                start_frame: span.start_frame,
                // Closed interval: both the start and stop frames are sampled.
                frame_count: (span.stop_frame - span.start_frame + 1).max(0) as usize,
            },
            None => Self::default(),
        }
    }

    /// Number of frames to sample per bone.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Absolute time of frame `frame`, for `frame < frame_count()`.
    pub fn time_at(&self, frame: usize) -> FrameTime {
        self.start_frame + frame as FrameTime
    }
}
