extern crate nalgebra as na;

use na::{Vector3, Vector4};

use crate::Float;
use crate::mvs::{patch::Patch, photometric::{ncc, project_grid}, registry::PhotoRegistry, visual_hull::visual_hull_check};
use crate::numerics::optimizer::nelder_mead::{minimize, NelderMeadResult};
use crate::sfm::triangulation::patch_vectors;

/** Objective value of poses that cannot be scored. Worse than any mean NCC. */
pub const PENALTY: Float = 2.0;

const FALLBACK_DEPTH_STEP_RATIO: Float = 0.01;

/**
 * Everything the objective needs besides the three free parameters (depth, theta, phi).
 * The ray is the unit direction from the reference optical center to the initial patch center.
 */
#[derive(Debug,Clone)]
pub struct OptimizationContext {
    pub reference_photo: usize,
    pub optical_center: Vector4<Float>,
    pub optical_axis: Vector4<Float>,
    pub ray: Vector4<Float>,
    pub target_photos: Vec<usize>
}

impl OptimizationContext {
    pub fn new(registry: &PhotoRegistry, patch: &Patch) -> OptimizationContext {
        let reference = registry.photo(patch.reference_photo);
        let optical_center = *reference.optical_center();
        let ray = (patch.center - optical_center).normalize();
        OptimizationContext{
            reference_photo: patch.reference_photo,
            optical_center,
            optical_axis: *reference.optical_axis(),
            ray,
            target_photos: patch.visible_photos.clone()
        }
    }

    /**
     * (depth, theta, phi) of a center on the context ray and a unit normal.
     */
    pub fn encode(&self, center: &Vector4<Float>, normal: &Vector4<Float>) -> Vector3<Float> {
        let depth = (center - self.optical_center).dot(&self.ray);
        let theta = normal[2].max(-1.0).min(1.0).acos();
        let phi = normal[1].atan2(normal[0]);
        Vector3::<Float>::new(depth, theta, phi)
    }

    /**
     * Center (w = 1) and unit normal (w = 0) of the parameters.
     */
    pub fn decode(&self, parameters: &Vector3<Float>) -> (Vector4<Float>, Vector4<Float>) {
        let (depth, theta, phi) = (parameters[0], parameters[1], parameters[2]);
        let center = self.optical_center + self.ray*depth;
        let normal = Vector4::<Float>::new(theta.sin()*phi.cos(), theta.sin()*phi.sin(), theta.cos(), 0.0);
        (center, normal)
    }
}

/**
 * Negative mean NCC of the decoded patch over the target photos.
 * Returns PENALTY for centers outside the visual hull, behind the reference camera or
 * with a degenerate tangent plane.
 */
pub fn objective(registry: &PhotoRegistry, context: &OptimizationContext, parameters: &Vector3<Float>) -> Float {
    if context.target_photos.is_empty() {
        return PENALTY;
    }
    let (center, normal) = context.decode(parameters);
    if !visual_hull_check(registry, &center) {
        return PENALTY;
    }
    if (center - context.optical_center).dot(&context.optical_axis) <= 0.0 {
        return PENALTY;
    }

    let reference = registry.photo(context.reference_photo);
    let grid_size = registry.parameters().patch_grid_size;
    let (right, up) = match patch_vectors(reference.camera.get_projection(), &center, &normal) {
        Ok(vectors) => vectors,
        Err(_) => return PENALTY
    };
    let reference_samples = match project_grid(reference, &center, &right, &up, grid_size) {
        Some(samples) => samples,
        None => return PENALTY
    };

    let total_ncc = context.target_photos.iter().map(|&id| {
        match project_grid(registry.photo(id), &center, &right, &up, grid_size) {
            Some(samples) => ncc(&reference_samples, &samples),
            None => 0.0
        }
    }).sum::<Float>();

    -total_ncc/(context.target_photos.len() as Float)
}

/**
 * Depth increment that moves the projection of the center by about `pixels` pixels,
 * averaged over the target photos.
 */
pub fn depth_step(registry: &PhotoRegistry, context: &OptimizationContext, center: &Vector4<Float>, pixels: Float) -> Float {
    let shifted = center + context.ray;
    let displacements = context.target_photos.iter().filter_map(|&id| {
        let camera = &registry.photo(id).camera;
        match (camera.project(center), camera.project(&shifted)) {
            (Some((x0,y0)), Some((x1,y1))) => Some(((x1-x0).powi(2) + (y1-y0).powi(2)).sqrt()),
            _ => None
        }
    }).filter(|d| d.is_finite() && *d > 0.0).collect::<Vec<Float>>();

    match displacements.is_empty() {
        true => FALLBACK_DEPTH_STEP_RATIO*(center - context.optical_center).norm(),
        false => pixels*(displacements.len() as Float)/displacements.iter().sum::<Float>()
    }
}

/**
 * Refines center and normal of the patch along its viewing ray from the reference photo,
 * maximizing the mean NCC against its current visible photos. Center and normal are replaced together.
 */
pub fn optimize_patch(registry: &PhotoRegistry, patch: &mut Patch) -> NelderMeadResult<3> {
    let parameters = registry.parameters().optimizer;
    let context = OptimizationContext::new(registry, patch);
    let x0 = context.encode(&patch.center, &patch.normal);
    let steps = Vector3::<Float>::new(
        depth_step(registry, &context, &patch.center, parameters.depth_step_pixels),
        parameters.angle_step,
        parameters.angle_step
    );

    let result = minimize(|x: &Vector3<Float>| objective(registry, &context, x), &x0, &steps, &parameters.nelder_mead());
    let (center, normal) = context.decode(&result.location);
    patch.center = center;
    patch.normal = normal;
    result
}
