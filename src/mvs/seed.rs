use tracing::{debug, info};

use crate::Float;
use crate::image::features::Feature;
use crate::mvs::{optimize::optimize_patch, patch::Patch, registry::PhotoRegistry, visibility::constraint_photos, visual_hull::visual_hull_check};
use crate::sfm::epipolar::relevant_features;
use crate::sfm::triangulation::triangulate;

/**
 * Tries to build one patch for `feature` of photo `photo_id`, searching correspondences in `relevant_photos`.
 * Candidates are visited best depth agreement first, the first one passing the strict visibility test
 * after refinement is registered. Returns the number of accepted patches (0 or 1).
 */
pub fn construct_patch(registry: &mut PhotoRegistry, photo_id: usize, relevant_photos: &[usize], feature: &Feature) -> usize {
    match find_seed(registry, photo_id, relevant_photos, feature) {
        Some(patch) => {
            let index = registry.register_patch(patch);
            debug!("feature ({},{}) of photo {} accepted as patch {}", feature.x, feature.y, photo_id, index);
            1
        },
        None => 0
    }
}

#[allow(non_snake_case)]
fn find_seed(registry: &PhotoRegistry, photo_id: usize, relevant_photos: &[usize], feature: &Feature) -> Option<Patch> {
    let parameters = *registry.parameters();
    let reference = registry.photo(photo_id);
    let reference_center = reference.optical_center();

    let mut candidates = relevant_features(registry, feature, photo_id, relevant_photos, parameters.feat_max_dist).into_iter()
    .filter_map(|(candidate, candidate_id)| {
        let candidate_photo = registry.photo(candidate_id);
        let F = registry.fundamental_matrix(photo_id, candidate_id);
        match triangulate(
            feature.x as Float, feature.y as Float,
            candidate.x as Float, candidate.y as Float,
            reference.camera.get_projection(), candidate_photo.camera.get_projection(), &F) {
            Ok(point) => Some((point, candidate_id)),
            Err(e) => {
                debug!("discarding candidate ({},{}) in photo {}: {}", candidate.x, candidate.y, candidate_id, e);
                None
            }
        }
    })
    .filter(|(point, _)| visual_hull_check(registry, point))
    .map(|(point, candidate_id)| {
        let relative_depth = (reference.camera.distance_to(&point) - registry.photo(candidate_id).camera.distance_to(&point)).abs();
        (point, relative_depth)
    })
    .collect::<Vec<_>>();

    // stable, equal disagreements keep the matcher order
    candidates.sort_by(|a,b| a.1.total_cmp(&b.1));

    for (point, _) in candidates {
        let mut patch = Patch::facing_camera(&point, reference_center, photo_id);

        let loose = constraint_photos(registry, &patch, parameters.loose_ncc, relevant_photos);
        if loose.len() < parameters.min_loose_photos {
            debug!("photo {} feature ({},{}): {} loose photos, skipping candidate", photo_id, feature.x, feature.y, loose.len());
            continue;
        }
        patch.visible_photos = loose;

        optimize_patch(registry, &mut patch);

        let strict = constraint_photos(registry, &patch, parameters.strict_ncc, relevant_photos);
        if strict.len() >= parameters.min_strict_photos {
            patch.visible_photos = strict;
            return Some(patch);
        }
        debug!("photo {} feature ({},{}): {} strict photos after refinement", photo_id, feature.x, feature.y, strict.len());
    }

    None
}

/**
 * Runs seed construction for every feature of every photo, photos in id order.
 * Returns the number of accepted patches.
 */
pub fn run_initial_matching(registry: &mut PhotoRegistry) -> usize {
    let mut total = 0;
    for photo_id in 0..registry.photo_count() {
        let relevant_photos = registry.relevant_photos(photo_id);
        let features = registry.photo(photo_id).features.iter().flatten().copied().collect::<Vec<Feature>>();
        let mut accepted = 0;
        for feature in &features {
            accepted += construct_patch(registry, photo_id, &relevant_photos, feature);
        }
        info!("photo {}: {} relevant photos, {} features, {} patches", photo_id, relevant_photos.len(), features.len(), accepted);
        total += accepted;
    }
    info!("initial matching produced {} patches", total);
    total
}
