extern crate nalgebra as na;

use na::Vector4;

use crate::Float;
use crate::mvs::registry::PhotoRegistry;

/**
 * False iff the point projects onto a background pixel of at least one silhouette.
 * Photos without a mask, projections with zero homogeneous scale and projections outside
 * of the image do not reject.
 */
pub fn visual_hull_check(registry: &PhotoRegistry, point: &Vector4<Float>) -> bool {
    registry.photos().iter().filter(|p| p.mask.is_some()).all(|photo| {
        match photo.camera.project(point) {
            Some((x,y)) => !photo.is_masked(y, x),
            None => true
        }
    })
}
