extern crate nalgebra as na;

pub mod tensor;

use na::Vector3;

use crate::Float;
use crate::image::features::Feature;
use crate::mvs::registry::PhotoRegistry;
use crate::sfm::epipolar::tensor::Fundamental;

/**
 * Epipolar line F*x in the second image for a pixel x of the first image.
 */
#[allow(non_snake_case)]
pub fn epipolar_line(F: &Fundamental, x: Float, y: Float) -> Vector3<Float> {
    F*Vector3::<Float>::new(x, y, 1.0)
}

/**
 * Algebraic distance |l^T x|, which is the pixel distance scaled by sqrt(l_x^2 + l_y^2).
 */
pub fn algebraic_line_distance(line: &Vector3<Float>, x: Float, y: Float) -> Float {
    (line[0]*x + line[1]*y + line[2]).abs()
}

/**
 * Collects features of the same type in the `search_ids` photos that lie within
 * `feat_max_dist` pixels of the epipolar line of `feature` (observed in `photo_id`).
 * Returns (candidate feature, photo id of the candidate), ordered by search id and then by
 * the per photo feature order.
 */
#[allow(non_snake_case)]
pub fn relevant_features(registry: &PhotoRegistry, feature: &Feature, photo_id: usize, search_ids: &[usize], feat_max_dist: Float) -> Vec<(Feature,usize)> {
    let mut candidates = Vec::<(Feature,usize)>::new();

    for &id in search_ids {
        if id == photo_id {
            continue;
        }
        let F = registry.fundamental_matrix(photo_id, id);
        let line = epipolar_line(&F, feature.x as Float, feature.y as Float);
        let max_dist = feat_max_dist*(line[0].powi(2) + line[1].powi(2)).sqrt();

        candidates.extend(
            registry.photo(id).features_of_type(feature.feature_type).iter()
            .filter(|f| algebraic_line_distance(&line, f.x as Float, f.y as Float) <= max_dist)
            .map(|f| (*f, id))
        );
    }

    candidates
}
