extern crate nalgebra as na;

use na::Vector4;

use crate::Float;
use crate::mvs::photo::Photo;

/**
 * Samples a grid_size x grid_size color grid around the projection of `center` in `photo`,
 * stepping along the projections of `right` and `up`. All three are divided by the homogeneous
 * scale of the projected center. Colors are stored interleaved (rgb per grid point), rows follow `up`.
 * Returns None if the projected center has a zero homogeneous scale.
 */
pub fn project_grid(photo: &Photo, center: &Vector4<Float>, right: &Vector4<Float>, up: &Vector4<Float>, grid_size: usize) -> Option<Vec<Float>> {
    let projected_center = photo.camera.project_homogeneous(center);
    let scale = match projected_center[2] {
        w if w != 0.0 => 1.0/w,
        _ => return None
    };
    let projected_right = photo.camera.project_homogeneous(right)*scale;
    let projected_up = photo.camera.project_homogeneous(up)*scale;
    let projected_center = projected_center*scale;

    let step = (grid_size as Float - 1.0)/2.0;
    let top_left = projected_center - (projected_right + projected_up)*step;

    let mut samples = Vec::<Float>::with_capacity(3*grid_size*grid_size);
    for i in 0..grid_size {
        for j in 0..grid_size {
            let (i_f, j_f) = (i as Float, j as Float);
            let x = top_left[0] + i_f*projected_up[0] + j_f*projected_right[0];
            let y = top_left[1] + i_f*projected_up[1] + j_f*projected_right[1];
            samples.extend(photo.sample(y, x).iter());
        }
    }
    Some(samples)
}

/**
 * Normalized cross correlation of two interleaved rgb sample vectors of equal length.
 * The mean of every channel is removed separately. Returns exactly 0 if either side has no variance.
 */
pub fn ncc(samples_one: &[Float], samples_two: &[Float]) -> Float {
    assert_eq!(samples_one.len(), samples_two.len());
    assert_eq!(samples_one.len() % 3, 0);
    let count = (samples_one.len()/3) as Float;
    if count == 0.0 {
        return 0.0;
    }

    let mut mean_one = [0.0 as Float; 3];
    let mut mean_two = [0.0 as Float; 3];
    for (i, (a, b)) in samples_one.iter().zip(samples_two.iter()).enumerate() {
        mean_one[i % 3] += a;
        mean_two[i % 3] += b;
    }
    for c in 0..3 {
        mean_one[c] /= count;
        mean_two[c] /= count;
    }

    let mut product = 0.0;
    let mut var_one = 0.0;
    let mut var_two = 0.0;
    for (i, (a, b)) in samples_one.iter().zip(samples_two.iter()).enumerate() {
        let diff_one = a - mean_one[i % 3];
        let diff_two = b - mean_two[i % 3];
        product += diff_one*diff_two;
        var_one += diff_one*diff_one;
        var_two += diff_two*diff_two;
    }

    let denominator = var_one*var_two;
    match denominator {
        d if d > 0.0 && d.is_finite() => product/d.sqrt(),
        _ => 0.0
    }
}

/**
 * NCC between the grids of a patch in its reference photo and in `photo`.
 * A grid that cannot be projected scores 0.
 */
pub fn patch_ncc_score(reference: &Photo, photo: &Photo, center: &Vector4<Float>, right: &Vector4<Float>, up: &Vector4<Float>, grid_size: usize) -> Float {
    match (project_grid(reference, center, right, up, grid_size), project_grid(photo, center, right, up, grid_size)) {
        (Some(reference_samples), Some(samples)) => ncc(&reference_samples, &samples),
        _ => 0.0
    }
}
