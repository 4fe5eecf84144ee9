use crate::Float;
use crate::mvs::{patch::Patch, photometric::patch_ncc_score, registry::PhotoRegistry};
use crate::sfm::triangulation::patch_vectors;

/**
 * Photos of `search_ids` that see the front side of the patch and whose NCC with the
 * reference photo is at least `min_ncc`. Keeps the order of `search_ids`.
 * If the tangent plane of the patch is degenerate no photo qualifies.
 */
pub fn constraint_photos(registry: &PhotoRegistry, patch: &Patch, min_ncc: Float, search_ids: &[usize]) -> Vec<usize> {
    let reference = registry.photo(patch.reference_photo);
    let (right, up) = match patch_vectors(reference.camera.get_projection(), &patch.center, &patch.normal) {
        Ok(vectors) => vectors,
        Err(_) => return Vec::new()
    };
    let grid_size = registry.parameters().patch_grid_size;

    search_ids.iter().copied().filter(|&id| {
        let photo = registry.photo(id);
        let to_camera = photo.optical_center() - patch.center;
        if to_camera.dot(&patch.normal) <= 0.0 {
            return false;
        }
        patch_ncc_score(reference, photo, &patch.center, &right, &up, grid_size) >= min_ncc
    }).collect()
}
