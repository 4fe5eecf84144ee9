extern crate nalgebra as na;

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use na::{Matrix3, Vector3};

use crate::Float;
use crate::numerics::lie::skew_symmetric;
use crate::sensors::camera::ProjectiveCamera;
use crate::sfm::epipolar::tensor::Fundamental;

/**
 * F = [e']x * P' * P^+ where e' = P' * C is the epipole of the first camera in the second image.
 * For x in the first image F*x is the epipolar line in the second image, i.e. x'^T * F * x = 0.
 */
#[allow(non_snake_case)]
pub fn fundamental_from_projections(camera_one: &ProjectiveCamera, camera_two: &ProjectiveCamera) -> Fundamental {
    let P_two = camera_two.get_projection();
    let epipole: Vector3<Float> = P_two*camera_one.get_optical_center();
    skew_symmetric(&epipole)*(P_two*camera_one.get_pseudo_inverse())
}

/**
 * Write-once cache of the fundamental matrices between all photo pairs.
 * Each unordered pair {i,j} is computed at most once, always in the orientation (min,max).
 * The opposite orientation is served as the transpose.
 */
pub struct FundamentalMatrixCache {
    size: usize,
    entries: Vec<OnceLock<Fundamental>>,
    computations: AtomicUsize
}

impl FundamentalMatrixCache {
    pub fn new(size: usize) -> FundamentalMatrixCache {
        let pair_count = size*size.saturating_sub(1)/2;
        FundamentalMatrixCache{
            size,
            entries: (0..pair_count).map(|_| OnceLock::new()).collect(),
            computations: AtomicUsize::new(0)
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /**
     * Fundamental matrix mapping points of photo `id_one` to epipolar lines in photo `id_two`.
     * The cameras have to belong to the given ids.
     */
    pub fn get(&self, id_one: usize, id_two: usize, camera_one: &ProjectiveCamera, camera_two: &ProjectiveCamera) -> Fundamental {
        assert!(id_one < self.size && id_two < self.size, "photo id out of range");
        if id_one == id_two {
            return Matrix3::<Float>::zeros();
        }

        let (low, high, camera_low, camera_high) = match id_one < id_two {
            true => (id_one, id_two, camera_one, camera_two),
            false => (id_two, id_one, camera_two, camera_one)
        };
        let fundamental = self.entries[self.pair_index(low, high)].get_or_init(|| {
            self.computations.fetch_add(1, Ordering::SeqCst);
            fundamental_from_projections(camera_low, camera_high)
        });

        match id_one < id_two {
            true => *fundamental,
            false => fundamental.transpose()
        }
    }

    /**
     * Number of matrices computed so far.
     */
    pub fn computation_count(&self) -> usize {
        self.computations.load(Ordering::SeqCst)
    }

    fn pair_index(&self, low: usize, high: usize) -> usize {
        low*self.size - low*(low+1)/2 + (high - low - 1)
    }
}
