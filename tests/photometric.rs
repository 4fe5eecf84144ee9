extern crate nalgebra as na;

mod common;

use na::Vector4;
use pmvs::{Float, Patch};
use pmvs::mvs::photometric::{ncc, project_grid, patch_ncc_score};
use pmvs::mvs::visibility::constraint_photos;
use pmvs::sfm::triangulation::patch_vectors;
use common::{assert_close, origin, plane_scene};

fn samples() -> Vec<Float> {
    (0..27).map(|i| ((i*7 % 11) as Float)*0.1 + ((i % 3) as Float)*0.05).collect()
}

#[test]
fn ncc_of_a_signal_with_itself_is_one() {
    let s = samples();
    assert_close(ncc(&s, &s), 1.0, 1e-12);
}

#[test]
fn ncc_is_invariant_to_gain_and_offset() {
    let s = samples();
    let transformed = s.iter().map(|v| 3.0*v + 0.25).collect::<Vec<Float>>();
    let inverted = s.iter().map(|v| 1.0 - v).collect::<Vec<Float>>();
    assert_close(ncc(&s, &transformed), 1.0, 1e-12);
    assert_close(ncc(&s, &inverted), -1.0, 1e-12);
}

#[test]
fn ncc_without_variance_is_zero() {
    let s = samples();
    let constant = vec![0.4; s.len()];
    assert_eq!(ncc(&s, &constant), 0.0);
    assert_eq!(ncc(&constant, &constant), 0.0);
}

#[test]
fn grid_of_the_reference_is_centered_on_the_projection() {
    let registry = plane_scene();
    let patch = Patch::facing_camera(&origin(), registry.photo(0).optical_center(), 0);
    let grid_size = registry.parameters().patch_grid_size;
    let (right, up) = patch_vectors(registry.photo(0).camera.get_projection(), &patch.center, &patch.normal).unwrap();

    let grid = project_grid(registry.photo(0), &patch.center, &right, &up, grid_size).unwrap();
    assert_eq!(grid.len(), 3*grid_size*grid_size);
    let middle = 3*(grid_size*grid_size/2);
    let expected = registry.photo(0).sample(50.0, 50.0);
    for c in 0..3 {
        assert_close(grid[middle + c], expected[c], 1e-12);
    }
}

#[test]
fn plane_patch_is_consistent_across_photos() {
    let registry = plane_scene();
    let patch = Patch::facing_camera(&origin(), registry.photo(0).optical_center(), 0);
    let (right, up) = patch_vectors(registry.photo(0).camera.get_projection(), &patch.center, &patch.normal).unwrap();

    for id in 1..4 {
        let score = patch_ncc_score(registry.photo(0), registry.photo(id), &patch.center, &right, &up, 5);
        assert_close(score, 1.0, 1e-9);
    }
}

#[test]
fn visibility_keeps_photos_above_the_threshold() {
    let registry = plane_scene();
    let patch = Patch::facing_camera(&origin(), registry.photo(0).optical_center(), 0);
    assert_eq!(constraint_photos(&registry, &patch, 0.9, &[1, 2, 3]), vec![1, 2, 3]);
    assert_eq!(constraint_photos(&registry, &patch, 0.9, &[3, 1]), vec![3, 1]);
}

#[test]
fn visibility_rejects_photos_behind_the_patch() {
    let registry = plane_scene();
    let mut patch = Patch::facing_camera(&origin(), registry.photo(0).optical_center(), 0);
    assert!(patch.normal[2] < 0.0);
    patch.normal = Vector4::<Float>::new(0.0, 0.0, 1.0, 0.0);

    assert!(constraint_photos(&registry, &patch, -2.0, &[1, 2, 3]).is_empty());
}

