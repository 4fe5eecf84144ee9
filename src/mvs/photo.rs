extern crate nalgebra as na;

use na::{Vector3, Vector4};

use crate::{Float, PmvsError, PmvsResult};
use crate::image::{Image, Mask, features::{Feature, FeatureType, FEATURE_TYPE_COUNT, split_into_slots}};
use crate::mvs::spatial_index::CellGrid;
use crate::sensors::camera::ProjectiveCamera;

/**
 * An image with its camera, optional silhouette, detected features per feature type and its cell grid.
 */
#[derive(Debug,Clone)]
pub struct Photo {
    pub id: usize,
    pub image: Image,
    pub mask: Option<Mask>,
    pub camera: ProjectiveCamera,
    pub features: Vec<Vec<Feature>>,
    pub cells: CellGrid
}

impl Photo {
    pub fn new(id: usize, image: Image, mask: Option<Mask>, camera: ProjectiveCamera, cell_size: usize) -> PmvsResult<Photo> {
        if cell_size == 0 {
            return Err(PmvsError::InvalidParameters(format!("cell size of photo {} has to be positive", id)));
        }
        if let Some(m) = &mask {
            if m.width() != image.width() || m.height() != image.height() {
                return Err(PmvsError::DatasetMismatch(format!("mask of photo {} is {}x{} but the image is {}x{}", id, m.width(), m.height(), image.width(), image.height())));
            }
        }
        let cells = CellGrid::new(image.width(), image.height(), cell_size);
        Ok(Photo{id, image, mask, camera, features: vec![Vec::new(); FEATURE_TYPE_COUNT], cells})
    }

    pub fn set_features(&mut self, features: &[Feature]) {
        self.features = split_into_slots(features);
    }

    pub fn features_of_type(&self, feature_type: FeatureType) -> &[Feature] {
        &self.features[feature_type.slot()]
    }

    pub fn feature_count(&self) -> usize {
        self.features.iter().map(|f| f.len()).sum()
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn height(&self) -> usize {
        self.image.height()
    }

    pub fn optical_center(&self) -> &Vector4<Float> {
        self.camera.get_optical_center()
    }

    pub fn optical_axis(&self) -> &Vector4<Float> {
        self.camera.get_optical_axis()
    }

    pub fn sample(&self, y: Float, x: Float) -> Vector3<Float> {
        self.image.sample(y, x)
    }

    /**
     * False without a mask and outside the image.
     */
    pub fn is_masked(&self, y: Float, x: Float) -> bool {
        match &self.mask {
            Some(m) => m.is_masked(y, x),
            None => false
        }
    }
}
