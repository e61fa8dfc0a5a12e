//! # Numeric Helpers
//!
//! Small shared helpers for the import pipeline: epsilon comparisons for
//! skinning weights and narrowing of source-scene matrices to the engine's
//! single-precision format.

use cgmath::Matrix4;

/// Tolerance below which a skinning weight is treated as zero.
///
/// Authoring tools routinely leave floating-point residue in weight arrays;
/// an exact-equality test would let those residues occupy influence slots.
pub const WEIGHT_EPSILON: f32 = 1e-6;

/// Returns `true` when `value` is zero within [`WEIGHT_EPSILON`].
pub fn near_zero(value: f32) -> bool {
    value.abs() <= WEIGHT_EPSILON
}

/// Narrows a double-precision source-scene matrix to single precision,
/// element by element.
///
/// FBX stores transforms as `f64`; the engine-side skeleton works in `f32`
/// so the matrices can be uploaded to the GPU unchanged.
pub fn matrix_to_f32(src: &Matrix4<f64>) -> Matrix4<f32> {
    Matrix4::new(
        src.x.x as f32,
        src.x.y as f32,
        src.x.z as f32,
        src.x.w as f32,
        src.y.x as f32,
        src.y.y as f32,
        src.y.z as f32,
        src.y.w as f32,
        src.z.x as f32,
        src.z.y as f32,
        src.z.z as f32,
        src.z.w as f32,
        src.w.x as f32,
        src.w.y as f32,
        src.w.z as f32,
        src.w.w as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Matrix4, Vector3};

    #[test]
    fn test_near_zero_tolerates_residue() {
        assert!(near_zero(0.0));
        assert!(near_zero(1e-7));
        assert!(near_zero(-1e-7));
        assert!(!near_zero(0.001));
        assert!(!near_zero(-0.001));
    }

    #[test]
    fn test_matrix_narrowing_is_element_wise() {
        let src = Matrix4::from_translation(Vector3::new(1.5f64, -2.0, 3.25))
            * Matrix4::from_scale(2.0f64);
        let dst = matrix_to_f32(&src);

        for col in 0..4 {
            for row in 0..4 {
                assert_eq!(dst[col][row], src[col][row] as f32);
            }
        }
    }
}
