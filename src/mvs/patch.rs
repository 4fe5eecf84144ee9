extern crate nalgebra as na;

use na::{Vector3, Vector4};
use serde::{Serialize, Deserialize};
use crate::Float;

/**
 * Oriented surface sample. `center` has w = 1, `normal` has w = 0 and unit length in xyz.
 * `visible_photos` are the photos (other than the reference) the patch is consistent with.
 */
#[derive(Debug,Clone,PartialEq)]
pub struct Patch {
    pub center: Vector4<Float>,
    pub normal: Vector4<Float>,
    pub reference_photo: usize,
    pub visible_photos: Vec<usize>
}

impl Patch {
    /**
     * Patch at `center` facing the optical center of the reference photo.
     */
    pub fn facing_camera(center: &Vector4<Float>, optical_center: &Vector4<Float>, reference_photo: usize) -> Patch {
        let to_camera = optical_center - center;
        let normal = Vector4::<Float>::new(to_camera[0], to_camera[1], to_camera[2], 0.0).normalize();
        Patch{center: *center, normal, reference_photo, visible_photos: Vec::new()}
    }

    pub fn to_record(&self) -> PatchRecord {
        PatchRecord{
            center: [self.center[0], self.center[1], self.center[2]],
            normal: [self.normal[0], self.normal[1], self.normal[2]],
            reference_photo: self.reference_photo,
            visible_photos: self.visible_photos.clone()
        }
    }
}

/**
 * Exported form of a patch.
 */
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct PatchRecord {
    pub center: [Float; 3],
    pub normal: [Float; 3],
    pub reference_photo: usize,
    pub visible_photos: Vec<usize>
}

impl PatchRecord {
    pub fn center(&self) -> Vector3<Float> {
        Vector3::<Float>::from(self.center)
    }

    pub fn normal(&self) -> Vector3<Float> {
        Vector3::<Float>::from(self.normal)
    }
}
