//! # Weight Assignment and Normalization
//!
//! Spreads each cluster's control-point weights onto the mesh's output
//! vertices, then rescales every vertex so its influences sum to one.
//!
//! Control points are the source's unique vertex positions; the polygon
//! vertex buffer duplicates them per polygon corner (UV seams, hard edges),
//! and every duplicate must receive the same bone influence.

use log::{debug, trace};

use crate::math::near_zero;
use crate::scene::SkinCluster;
use crate::skeleton::vertex::{SkinnedVertex, MAX_INFLUENCES};

/// Records `cluster`'s influences on every matching output vertex.
///
/// `polygon_vertices[v]` is the control-point index of output vertex `v`;
/// `vertices` is parallel to it. Near-zero source weights are skipped so
/// floating-point residue never occupies an influence slot. A vertex whose
/// four slots are already taken drops the influence.
pub(crate) fn assign_cluster_weights(
    vertices: &mut [SkinnedVertex],
    polygon_vertices: &[i32],
    cluster: &SkinCluster,
    bone_index: u32,
) {
    let pairs = cluster
        .control_point_indices
        .iter()
        .zip(&cluster.control_point_weights);
    for (&point, &weight) in pairs {
        let weight = weight as f32;
        if near_zero(weight) {
            continue;
        }
        for (vertex, _) in vertices
            .iter_mut()
            .zip(polygon_vertices)
            .filter(|&(_, &corner)| corner == point)
        {
            if !vertex.push_influence(bone_index, weight) {
                trace!(
                    "control point {point}: bone {bone_index} dropped, all \
                     {MAX_INFLUENCES} slots taken"
                );
            }
        }
    }
}

/// Normalizes every vertex's influences in place.
///
/// Vertices with zero total weight keep all-zero weights instead of being
/// divided by zero; they are counted and reported once per buffer.
pub(crate) fn normalize_weights(vertices: &mut [SkinnedVertex]) {
    let mut unweighted = 0usize;
    for vertex in vertices.iter_mut() {
        if !vertex.normalize() {
            unweighted += 1;
        }
    }
    if unweighted > 0 {
        debug!("{unweighted} of {} vertices have no bone influence", vertices.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Matrix4, SquareMatrix};

    fn cluster(indices: Vec<i32>, weights: Vec<f64>) -> SkinCluster {
        SkinCluster {
            link_node: 0,
            transform_link: Matrix4::identity(),
            control_point_indices: indices,
            control_point_weights: weights,
        }
    }

    #[test]
    fn test_duplicated_control_points_all_receive_weight() {
        // Control point 1 appears as output vertices 1 and 3 (a seam).
        let polygon_vertices = [0, 1, 2, 1];
        let mut vertices = vec![SkinnedVertex::default(); 4];
        let cluster = cluster(vec![1], vec![0.8]);

        assign_cluster_weights(&mut vertices, &polygon_vertices, &cluster, 3);

        for v in [1usize, 3] {
            assert_eq!(vertices[v].influences, 1);
            assert_eq!(vertices[v].joints[0], 3);
            assert_eq!(vertices[v].weights[0], 0.8);
        }
        assert_eq!(vertices[0].influences, 0);
        assert_eq!(vertices[2].influences, 0);
    }

    #[test]
    fn test_residue_weights_do_not_take_slots() {
        let polygon_vertices = [0];
        let mut vertices = vec![SkinnedVertex::default()];
        let cluster = cluster(vec![0, 0], vec![1e-9, 0.6]);

        assign_cluster_weights(&mut vertices, &polygon_vertices, &cluster, 0);

        assert_eq!(vertices[0].influences, 1);
        assert_eq!(vertices[0].weights[0], 0.6);
    }

    #[test]
    fn test_normalization_sums_to_one() {
        let mut vertices = vec![SkinnedVertex::default(); 2];
        vertices[0].push_influence(0, 0.5);
        vertices[0].push_influence(1, 1.5);
        vertices[1].push_influence(2, 0.2);
        vertices[1].push_influence(3, 0.2);
        vertices[1].push_influence(4, 0.1);

        normalize_weights(&mut vertices);

        assert_eq!(vertices[0].weights, [0.25, 0.75, 0.0, 0.0]);
        for vertex in &vertices {
            assert!((vertex.weight_sum() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_unweighted_vertices_stay_zero() {
        let mut vertices = vec![SkinnedVertex::default()];
        normalize_weights(&mut vertices);
        assert_eq!(vertices[0].weights, [0.0; 4]);
    }
}
