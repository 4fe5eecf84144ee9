use thiserror::Error;

pub type PmvsResult<T> = Result<T, PmvsError>;

/**
 * Only load-time conditions are reported through these types. Per-candidate
 * failures inside seed construction are discarded by the caller.
 */
#[derive(Debug, Error)]
pub enum PmvsError {
    /** Projection matrix with the wrong number of entries or a singular left 3x3 block */
    #[error("Invalid calibration: {0}")]
    InvalidCalibration(String),

    /** Singular linear system during triangulation or tangent plane construction */
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /** Unequal numbers of images, masks and projection matrices */
    #[error("Dataset mismatch: {0}")]
    DatasetMismatch(String),

    /** Matching parameters the pipeline cannot run with, e.g. a zero cell size */
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] ::image::ImageError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<std::num::ParseFloatError> for PmvsError {
    fn from(err: std::num::ParseFloatError) -> Self {
        PmvsError::Parse(format!("Failed to parse float: {err}"))
    }
}
