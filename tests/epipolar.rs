extern crate nalgebra as na;

mod common;

use na::{Matrix3, Vector3, Vector4};
use pmvs::Float;
use pmvs::image::features::{Feature, FeatureType};
use pmvs::sensors::camera::ProjectiveCamera;
use pmvs::sfm::epipolar::{relevant_features, epipolar_line, algebraic_line_distance};
use pmvs::sfm::epipolar::tensor::fundamental::{fundamental_from_projections, FundamentalMatrixCache};
use common::{plane_scene, projection, rotation_y};

fn general_cameras() -> (ProjectiveCamera, ProjectiveCamera) {
    let one = ProjectiveCamera::new(&projection(&rotation_y(10.0), &Vector3::<Float>::new(-1.0, 0.2, -9.0))).unwrap();
    let two = ProjectiveCamera::new(&projection(&rotation_y(-35.0), &Vector3::<Float>::new(5.0, -0.4, -8.0))).unwrap();
    (one, two)
}

#[test]
#[allow(non_snake_case)]
fn corresponding_points_satisfy_the_epipolar_constraint() {
    let (one, two) = general_cameras();
    let F = fundamental_from_projections(&one, &two);

    for point in [Vector4::<Float>::new(0.0, 0.0, 0.0, 1.0), Vector4::<Float>::new(0.7, -0.3, 1.2, 1.0), Vector4::<Float>::new(-0.5, 0.9, -0.4, 1.0)].iter() {
        let (x1, y1) = one.project(point).unwrap();
        let (x2, y2) = two.project(point).unwrap();
        let line = epipolar_line(&F, x1, y1);
        let distance = algebraic_line_distance(&line, x2, y2)/(line[0].powi(2) + line[1].powi(2)).sqrt();
        assert!(distance < 1e-6, "point is {} pixels off its epipolar line", distance);
    }
}

#[test]
fn cache_is_symmetric_by_transpose() {
    let (one, two) = general_cameras();
    let cache = FundamentalMatrixCache::new(2);

    let forward = cache.get(0, 1, &one, &two);
    let backward = cache.get(1, 0, &two, &one);
    assert_eq!(backward, forward.transpose());
    assert_eq!(cache.get(0, 0, &one, &one), Matrix3::<Float>::zeros());
}

#[test]
fn cache_computes_every_pair_once() {
    let registry = plane_scene();
    assert_eq!(registry.fundamental_computation_count(), 0);

    let first = registry.fundamental_matrix(0, 2);
    let second = registry.fundamental_matrix(2, 0);
    let third = registry.fundamental_matrix(0, 2);
    assert_eq!(registry.fundamental_computation_count(), 1);
    assert_eq!(first, third);
    assert_eq!(second, first.transpose());

    registry.fundamental_matrix(3, 1);
    registry.fundamental_matrix(1, 3);
    assert_eq!(registry.fundamental_computation_count(), 2);
}

#[test]
fn matcher_returns_features_near_the_epipolar_line() {
    let registry = plane_scene();
    let feature = Feature::new(50, 50, 1.0, FeatureType::DoG);

    let candidates = relevant_features(&registry, &feature, 0, &[0, 1, 2, 3], registry.parameters().feat_max_dist);
    let found = candidates.iter().map(|(f, id)| (f.x, f.y, *id)).collect::<Vec<_>>();
    assert_eq!(found, vec![(40, 50, 1), (60, 50, 2), (50, 40, 3)]);
    assert!(candidates.iter().all(|(f, _)| f.feature_type == FeatureType::DoG));
}

#[test]
fn matcher_respects_the_distance_threshold() {
    let registry = plane_scene();
    let off_line = Feature::new(50, 54, 1.0, FeatureType::DoG);

    assert!(relevant_features(&registry, &off_line, 0, &[1, 2], 2.0).is_empty());
    assert_eq!(relevant_features(&registry, &off_line, 0, &[1, 2], 5.0).len(), 2);
}
