extern crate nalgebra as na;

use na::Vector3;
use tracing::warn;

use crate::{Float, PmvsError, PmvsResult};
use crate::image::{Image, Mask, features::Feature};
use crate::mvs::{patch::Patch, photo::Photo, runtime_parameters::MatchingParameters};
use crate::sensors::camera::ProjectiveCamera;
use crate::sfm::epipolar::tensor::{Fundamental, fundamental::FundamentalMatrixCache};

/**
 * Owns all photos of a dataset, the fundamental matrices between them and the accepted patches.
 * Patches are only ever appended, cells refer to them by index.
 */
pub struct PhotoRegistry {
    photos: Vec<Photo>,
    fundamentals: FundamentalMatrixCache,
    patches: Vec<Patch>,
    parameters: MatchingParameters
}

impl PhotoRegistry {

    /**
     * Images, masks (if any) and row-major 3x4 projection matrices are aligned by index.
     */
    pub fn new(images: Vec<Image>, masks: Option<Vec<Mask>>, projections: &[Vec<Float>], parameters: MatchingParameters) -> PmvsResult<PhotoRegistry> {
        parameters.validate()?;
        if images.len() != projections.len() {
            return Err(PmvsError::DatasetMismatch(format!("{} images but {} projection matrices", images.len(), projections.len())));
        }
        let mut masks_per_photo: Vec<Option<Mask>> = match masks {
            Some(m) if m.len() != images.len() => return Err(PmvsError::DatasetMismatch(format!("{} images but {} masks", images.len(), m.len()))),
            Some(m) => m.into_iter().map(Some).collect(),
            None => vec![None; images.len()]
        };

        let mut photos = Vec::<Photo>::with_capacity(images.len());
        for (id, (image, projection)) in images.into_iter().zip(projections.iter()).enumerate() {
            let camera = ProjectiveCamera::new(projection)?;
            photos.push(Photo::new(id, image, masks_per_photo[id].take(), camera, parameters.cell_size)?);
        }

        PhotoRegistry::from_photos(photos, parameters)
    }

    pub fn from_photos(photos: Vec<Photo>, parameters: MatchingParameters) -> PmvsResult<PhotoRegistry> {
        parameters.validate()?;
        if let Some((position, photo)) = photos.iter().enumerate().find(|(i,p)| p.id != *i) {
            return Err(PmvsError::DatasetMismatch(format!("photo {} is stored at position {}", photo.id, position)));
        }
        if let Some(photo) = photos.iter().find(|p| p.cells.cell_size() != parameters.cell_size) {
            return Err(PmvsError::InvalidParameters(format!("cells of photo {} are {} pixels, parameters ask for {}", photo.id, photo.cells.cell_size(), parameters.cell_size)));
        }
        let fundamentals = FundamentalMatrixCache::new(photos.len());
        Ok(PhotoRegistry{photos, fundamentals, patches: Vec::new(), parameters})
    }

    pub fn photo(&self, id: usize) -> &Photo {
        &self.photos[id]
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn parameters(&self) -> &MatchingParameters {
        &self.parameters
    }

    pub fn set_features(&mut self, photo_id: usize, features: &[Feature]) {
        self.photos[photo_id].set_features(features);
    }

    pub fn fundamental_matrix(&self, id_one: usize, id_two: usize) -> Fundamental {
        self.fundamentals.get(id_one, id_two, &self.photos[id_one].camera, &self.photos[id_two].camera)
    }

    pub fn fundamental_computation_count(&self) -> usize {
        self.fundamentals.computation_count()
    }

    /**
     * Photos whose optical axis encloses an angle with the axis of `id` strictly between the
     * angles given by `cos_min_angle` and `cos_max_angle`.
     */
    pub fn relevant_photos(&self, id: usize) -> Vec<usize> {
        let axis = self.photos[id].optical_axis().fixed_rows::<3>(0).normalize();
        self.photos.iter().filter(|p| p.id != id).filter(|p| {
            let other: Vector3<Float> = p.optical_axis().fixed_rows::<3>(0).normalize();
            let cos_angle = axis.dot(&other);
            cos_angle > self.parameters.cos_max_angle && cos_angle < self.parameters.cos_min_angle
        }).map(|p| p.id).collect()
    }

    /**
     * Appends the patch and registers its index in the cell of every visible photo
     * the center projects into. Returns the patch index.
     */
    pub fn register_patch(&mut self, patch: Patch) -> usize {
        let index = self.patches.len();
        for &id in &patch.visible_photos {
            let photo = &mut self.photos[id];
            let registered = photo.camera.project(&patch.center).and_then(|(x,y)| photo.cells.insert(y, x, index));
            if registered.is_none() {
                warn!("patch {} projects outside the cell grid of photo {}", index, id);
            }
        }
        self.patches.push(patch);
        index
    }
}
