extern crate image as image_rs;

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::{Float, PmvsError, PmvsResult};
use crate::image::{Image, Mask, features::Feature};
use crate::mvs::patch::{Patch, PatchRecord};

pub const PROJECTION_ENTRY_COUNT: usize = 12;

/**
 * Layout of a dataset directory:
 * <root>/images/NNNN.<image_extension>, <root>/silhouettes/NNNN.<mask_extension>, <root>/calib/NNNN.txt
 */
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct DatasetParameters {
    pub root: PathBuf,
    pub image_extension: String,
    /** Silhouettes are only loaded if an extension is given */
    #[serde(default)]
    pub mask_extension: Option<String>
}

pub struct LoadedDataset {
    pub images: Vec<Image>,
    pub masks: Option<Vec<Mask>>,
    pub projections: Vec<Vec<Float>>
}

fn indexed_file(dir: &Path, index: usize, extension: &str) -> PathBuf {
    dir.join(format!("{:04}.{}", index, extension))
}

/**
 * Loads images 0000, 0001, ... until the first missing one, together with their calibration
 * and optional silhouettes. A missing calibration or silhouette for a present image is an error.
 */
pub fn load_dataset(parameters: &DatasetParameters) -> PmvsResult<LoadedDataset> {
    let image_dir = parameters.root.join("images");
    let mask_dir = parameters.root.join("silhouettes");
    let calib_dir = parameters.root.join("calib");

    let mut images = Vec::<Image>::new();
    let mut projections = Vec::<Vec<Float>>::new();
    let mut masks = parameters.mask_extension.as_ref().map(|_| Vec::<Mask>::new());

    loop {
        let index = images.len();
        let image_path = indexed_file(&image_dir, index, &parameters.image_extension);
        if !image_path.is_file() {
            break;
        }
        let rgb = image_rs::open(&image_path)?.to_rgb8();
        images.push(Image::from_rgb_image(&rgb));

        let calib_path = indexed_file(&calib_dir, index, "txt");
        if !calib_path.is_file() {
            return Err(PmvsError::DatasetMismatch(format!("no calibration {} for image {}", calib_path.display(), image_path.display())));
        }
        projections.push(parse_projection_matrix(&fs::read_to_string(&calib_path)?)?);

        if let (Some(masks), Some(extension)) = (masks.as_mut(), parameters.mask_extension.as_ref()) {
            let mask_path = indexed_file(&mask_dir, index, extension);
            if !mask_path.is_file() {
                return Err(PmvsError::DatasetMismatch(format!("no silhouette {} for image {}", mask_path.display(), image_path.display())));
            }
            masks.push(Mask::from_gray_image(&image_rs::open(&mask_path)?.to_luma8()));
        }
    }

    info!("loaded {} photos from {}", images.len(), parameters.root.display());
    Ok(LoadedDataset{images, masks, projections})
}

/**
 * A header token (e.g. CONTOUR) followed by the 12 row-major entries of a 3x4 projection matrix.
 */
pub fn parse_projection_matrix(contents: &str) -> PmvsResult<Vec<Float>> {
    let mut tokens = contents.split_whitespace();
    match tokens.next() {
        Some(header) if header.parse::<Float>().is_err() => (),
        _ => return Err(PmvsError::Parse("calibration file has to start with a header token".to_string()))
    };
    let values = tokens.map(|t| t.parse::<Float>()).collect::<Result<Vec<Float>,_>>()?;
    match values.len() {
        PROJECTION_ENTRY_COUNT => Ok(values),
        n => Err(PmvsError::InvalidCalibration(format!("expected {} projection entries, found {}", PROJECTION_ENTRY_COUNT, n)))
    }
}

pub fn load_features(file_path: &Path) -> PmvsResult<Vec<Feature>> {
    let contents = fs::read_to_string(file_path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

pub fn patches_to_yaml(patches: &[Patch]) -> PmvsResult<String> {
    let records = patches.iter().map(|p| p.to_record()).collect::<Vec<PatchRecord>>();
    Ok(serde_yaml::to_string(&records)?)
}

pub fn save_patches(file_path: &Path, patches: &[Patch]) -> PmvsResult<()> {
    fs::write(file_path, patches_to_yaml(patches)?)?;
    info!("wrote {} patches to {}", patches.len(), file_path.display());
    Ok(())
}

pub fn load_patches(file_path: &Path) -> PmvsResult<Vec<PatchRecord>> {
    let contents = fs::read_to_string(file_path)?;
    Ok(serde_yaml::from_str(&contents)?)
}
