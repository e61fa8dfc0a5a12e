//! # Per-Vertex Skinning Record
//!
//! This module defines the per-vertex output of the weight assigner: a
//! fixed set of four (joint, weight) slots in a GPU-compatible layout.
//!
//! # Memory Layout
//!
//! The `#[repr(C)]` attribute gives the struct a C-compatible layout so the
//! weight and joint arrays can be sliced straight into a GPU vertex buffer.
//! The trailing `influences` counter records how many slots are in use; a
//! renderer that only wants the arrays can skip it via attribute offsets.

use crate::math::near_zero;

/// Maximum number of bones that may influence one vertex.
///
/// Influences past this cap are dropped by the weight assigner; skinning
/// shaders blend exactly this many transforms.
pub const MAX_INFLUENCES: usize = 4;

/// Bone influences for a single output vertex.
///
/// Slots fill in discovery order; slots at and beyond `influences` stay
/// zero. After [`normalize`](Self::normalize), the used weights sum to 1.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkinnedVertex {
    /// Blend weight per used slot.
    pub weights: [f32; MAX_INFLUENCES],
    /// Bone index per used slot, parallel to `weights`.
    pub joints: [u32; MAX_INFLUENCES],
    /// Number of slots in use.
    pub influences: u32,
}

impl SkinnedVertex {
    /// Records one bone influence in the next free slot.
    ///
    /// Returns `false` when all [`MAX_INFLUENCES`] slots are already taken;
    /// the influence is dropped and the vertex is left unchanged.
    pub fn push_influence(&mut self, joint: u32, weight: f32) -> bool {
        let slot = self.influences as usize;
        if slot >= MAX_INFLUENCES {
            return false;
        }
        self.joints[slot] = joint;
        self.weights[slot] = weight;
        self.influences += 1;
        true
    }

    /// Rescales the used weight slots so they sum to 1.
    ///
    /// A vertex whose weights sum to (near) zero — no influences, or only
    /// degenerate ones — is left untouched rather than divided by zero, and
    /// `false` is returned so callers can count such vertices.
    pub fn normalize(&mut self) -> bool {
        let used = self.influences as usize;
        let sum: f32 = self.weights[..used].iter().sum();
        if near_zero(sum) {
            return false;
        }
        for weight in &mut self.weights[..used] {
            *weight /= sum;
        }
        true
    }

    /// Sum of the used weight slots.
    pub fn weight_sum(&self) -> f32 {
        self.weights[..self.influences as usize].iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_fill_in_discovery_order() {
        let mut vertex = SkinnedVertex::default();
        assert!(vertex.push_influence(7, 0.5));
        assert!(vertex.push_influence(2, 0.3));

        assert_eq!(vertex.influences, 2);
        assert_eq!(vertex.joints[..2], [7, 2]);
        assert_eq!(vertex.weights[..2], [0.5, 0.3]);
        assert_eq!(vertex.weights[2..], [0.0, 0.0]);
    }

    #[test]
    fn test_fifth_influence_is_dropped() {
        let mut vertex = SkinnedVertex::default();
        for joint in 0..4 {
            assert!(vertex.push_influence(joint, 0.25));
        }
        assert!(!vertex.push_influence(4, 0.9));

        assert_eq!(vertex.influences, 4);
        assert_eq!(vertex.joints, [0, 1, 2, 3]);
        assert_eq!(vertex.weights, [0.25; 4]);
    }

    #[test]
    fn test_normalize_rescales_used_slots() {
        let mut vertex = SkinnedVertex::default();
        vertex.push_influence(0, 0.5);
        vertex.push_influence(1, 1.5);

        assert!(vertex.normalize());
        assert_eq!(vertex.weights, [0.25, 0.75, 0.0, 0.0]);
        assert!((vertex.weight_sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_leaves_unweighted_vertex_at_zero() {
        let mut vertex = SkinnedVertex::default();
        assert!(!vertex.normalize());
        assert_eq!(vertex.weights, [0.0; 4]);

        // Weights must stay finite; a naive divide would produce NaN here.
        assert!(vertex.weights.iter().all(|w| w.is_finite()));
    }
}
