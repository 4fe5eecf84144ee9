extern crate nalgebra as na;

mod common;

use na::{Vector3, Vector4};
use pmvs::{Float, Patch};
use pmvs::mvs::optimize::{objective, optimize_patch, depth_step, OptimizationContext, PENALTY};
use common::{assert_close, plane_scene};

fn perturbed_patch(depth_offset: Float) -> Patch {
    let registry = plane_scene();
    let center = Vector4::<Float>::new(0.0, 0.0, depth_offset, 1.0);
    let mut patch = Patch::facing_camera(&center, registry.photo(0).optical_center(), 0);
    patch.visible_photos = vec![1, 2, 3];
    patch
}

#[test]
fn encoding_round_trips() {
    let registry = plane_scene();
    let mut patch = perturbed_patch(0.3);
    patch.normal = Vector4::<Float>::new(0.2, -0.1, -1.0, 0.0).normalize();
    let context = OptimizationContext::new(&registry, &patch);

    let (center, normal) = context.decode(&context.encode(&patch.center, &patch.normal));
    assert!((center - patch.center).norm() < 1e-12);
    assert!((normal - patch.normal).norm() < 1e-12);
    assert_eq!(center[3], 1.0);
    assert_eq!(normal[3], 0.0);
}

#[test]
fn correct_pose_scores_best() {
    let registry = plane_scene();
    let patch = perturbed_patch(0.0);
    let context = OptimizationContext::new(&registry, &patch);

    let value = objective(&registry, &context, &context.encode(&patch.center, &patch.normal));
    assert_close(value, -1.0, 1e-9);
}

#[test]
fn invalid_poses_are_penalized() {
    let registry = plane_scene();
    let patch = perturbed_patch(0.0);
    let context = OptimizationContext::new(&registry, &patch);
    let x = context.encode(&patch.center, &patch.normal);

    let behind = Vector3::<Float>::new(-5.0, x[1], x[2]);
    assert_eq!(objective(&registry, &context, &behind), PENALTY);

    let mut empty = context.clone();
    empty.target_photos.clear();
    assert_eq!(objective(&registry, &empty, &x), PENALTY);
}

#[test]
fn depth_step_moves_about_one_pixel() {
    let registry = plane_scene();
    let patch = perturbed_patch(0.0);
    let context = OptimizationContext::new(&registry, &patch);

    let step = depth_step(&registry, &context, &patch.center, 1.0);
    let moved = patch.center + context.ray*step;
    let (x0, _) = registry.photo(1).camera.project(&patch.center).unwrap();
    let (x1, _) = registry.photo(1).camera.project(&moved).unwrap();
    assert_close((x1 - x0).abs(), 1.0, 0.05);
}

#[test]
fn refinement_never_worsens_the_score() {
    let registry = plane_scene();
    let mut patch = perturbed_patch(0.8);
    let context = OptimizationContext::new(&registry, &patch);
    let initial = objective(&registry, &context, &context.encode(&patch.center, &patch.normal));

    let result = optimize_patch(&registry, &mut patch);
    assert!(result.value <= initial);
    assert!(result.evaluations <= registry.parameters().optimizer.max_evaluations);
    assert_eq!(patch.center[3], 1.0);
    assert_eq!(patch.normal[3], 0.0);
    assert_close(patch.normal.norm(), 1.0, 1e-12);
    assert_eq!(patch.visible_photos, vec![1, 2, 3]);
}

#[test]
fn refinement_keeps_the_center_on_the_viewing_ray() {
    let registry = plane_scene();
    let mut patch = perturbed_patch(0.5);
    let ray_before = (patch.center - registry.photo(0).optical_center()).normalize();

    optimize_patch(&registry, &mut patch);
    let ray_after = (patch.center - registry.photo(0).optical_center()).normalize();
    assert!((ray_before - ray_after).norm() < 1e-9);
}

#[test]
fn refinement_is_deterministic() {
    let registry = plane_scene();
    let mut first = perturbed_patch(0.4);
    let mut second = first.clone();

    let result_one = optimize_patch(&registry, &mut first);
    let result_two = optimize_patch(&registry, &mut second);
    assert_eq!(first, second);
    assert_eq!(result_one.value.to_bits(), result_two.value.to_bits());
}
