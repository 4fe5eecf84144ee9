use std::fmt;
use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};

use crate::{Float, PmvsError, PmvsResult};
use crate::numerics::optimizer::nelder_mead::NelderMeadParameters;

/** Depth, theta and phi */
pub const PATCH_PARAMETER_COUNT: usize = 3;

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct OptimizerParameters {
    pub max_evaluations: usize,
    pub max_iterations: usize,
    pub absolute_tolerance: Float,
    pub converge_iterations: usize,
    /** Initial simplex step of the depth coordinate, in pixels of movement in the target photos */
    pub depth_step_pixels: Float,
    /** Initial simplex step of both normal angles, in radians */
    pub angle_step: Float
}

impl Default for OptimizerParameters {
    fn default() -> Self {
        let nm = NelderMeadParameters::default();
        OptimizerParameters{
            max_evaluations: nm.max_evaluations,
            max_iterations: nm.max_iterations,
            absolute_tolerance: nm.absolute_tolerance,
            converge_iterations: nm.converge_iterations,
            depth_step_pixels: 1.0,
            angle_step: 0.2
        }
    }
}

impl OptimizerParameters {
    pub fn nelder_mead(&self) -> NelderMeadParameters {
        NelderMeadParameters{
            max_evaluations: self.max_evaluations,
            max_iterations: self.max_iterations,
            absolute_tolerance: self.absolute_tolerance,
            converge_iterations: self.converge_iterations
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct MatchingParameters {
    /** Maximum pixel distance of a correspondence to the epipolar line */
    pub feat_max_dist: Float,
    pub patch_grid_size: usize,
    pub cell_size: usize,
    pub loose_ncc: Float,
    pub strict_ncc: Float,
    pub min_loose_photos: usize,
    pub min_strict_photos: usize,
    /** Upper cosine bound of the optical axis angle between relevant photos (smallest angle) */
    pub cos_min_angle: Float,
    /** Lower cosine bound of the optical axis angle between relevant photos (largest angle) */
    pub cos_max_angle: Float,
    pub optimizer: OptimizerParameters
}

impl Default for MatchingParameters {
    fn default() -> Self {
        MatchingParameters{
            feat_max_dist: 2.0,
            patch_grid_size: 5,
            cell_size: 2,
            loose_ncc: 0.6,
            strict_ncc: 0.7,
            min_loose_photos: 2,
            min_strict_photos: 3,
            cos_min_angle: (20.0 as Float).to_radians().cos(),
            cos_max_angle: (60.0 as Float).to_radians().cos(),
            optimizer: OptimizerParameters::default()
        }
    }
}

impl MatchingParameters {
    pub fn from_yaml_str(yaml: &str) -> PmvsResult<MatchingParameters> {
        let parameters: MatchingParameters = serde_yaml::from_str(yaml)?;
        parameters.validate()?;
        Ok(parameters)
    }

    /**
     * Rejects values the pipeline cannot run with: empty cells or grids, photo counts of zero,
     * non finite thresholds and an optimizer budget smaller than the initial simplex.
     */
    pub fn validate(&self) -> PmvsResult<()> {
        let invalid = |message: &str| Err(PmvsError::InvalidParameters(message.to_string()));
        match self {
            p if p.cell_size == 0 => invalid("cell_size has to be positive"),
            p if p.patch_grid_size == 0 => invalid("patch_grid_size has to be positive"),
            p if p.min_loose_photos == 0 || p.min_strict_photos == 0 => invalid("min_loose_photos and min_strict_photos have to be positive"),
            p if !(p.feat_max_dist >= 0.0 && p.feat_max_dist.is_finite()) => invalid("feat_max_dist has to be finite and non negative"),
            p if !(p.loose_ncc.is_finite() && p.strict_ncc.is_finite()) => invalid("NCC thresholds have to be finite"),
            p if !(p.cos_max_angle < p.cos_min_angle) => invalid("cos_max_angle has to be smaller than cos_min_angle"),
            p => p.optimizer.validate()
        }
    }
}

impl OptimizerParameters {
    pub fn validate(&self) -> PmvsResult<()> {
        let invalid = |message: &str| Err(PmvsError::InvalidParameters(message.to_string()));
        match self {
            p if p.max_evaluations < PATCH_PARAMETER_COUNT + 1 => invalid("optimizer max_evaluations has to cover the initial simplex"),
            p if p.max_iterations == 0 || p.converge_iterations == 0 => invalid("optimizer iteration counts have to be positive"),
            p if !(p.absolute_tolerance >= 0.0 && p.absolute_tolerance.is_finite()) => invalid("optimizer absolute_tolerance has to be finite and non negative"),
            p if !(p.depth_step_pixels > 0.0 && p.depth_step_pixels.is_finite()) => invalid("optimizer depth_step_pixels has to be positive"),
            p if !(p.angle_step > 0.0 && p.angle_step.is_finite()) => invalid("optimizer angle_step has to be positive"),
            _ => Ok(())
        }
    }
}

pub fn load_matching_parameters(path: &Path) -> PmvsResult<MatchingParameters> {
    let contents = fs::read_to_string(path)?;
    MatchingParameters::from_yaml_str(&contents)
}

impl fmt::Display for MatchingParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "feat_dist_{}_grid_{}_cell_{}_ncc_{}_{}_photos_{}_{}_max_eval_{}_tol_{:+e}",
            self.feat_max_dist, self.patch_grid_size, self.cell_size,
            self.loose_ncc, self.strict_ncc,
            self.min_loose_photos, self.min_strict_photos,
            self.optimizer.max_evaluations, self.optimizer.absolute_tolerance)
    }
}
